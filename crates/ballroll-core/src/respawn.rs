//! Respawn point selection.

use bevy::math::Vec3;

/// Index of the point closest to `position`.
///
/// Ties go to the lowest index. Returns `None` for an empty list.
pub fn nearest_point(points: &[Vec3], position: Vec3) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (index, point) in points.iter().enumerate() {
        let distance = point.distance_squared(position);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_has_no_nearest() {
        assert_eq!(nearest_point(&[], Vec3::ZERO), None);
    }

    #[test]
    fn test_picks_minimum_distance() {
        let points = [
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(-5.0, 0.0, 0.0),
        ];
        assert_eq!(nearest_point(&points, Vec3::ZERO), Some(1));
        assert_eq!(nearest_point(&points, Vec3::new(-4.0, 0.0, 0.0)), Some(2));
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let points = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        assert_eq!(nearest_point(&points, Vec3::ZERO), Some(0));
    }

    #[test]
    fn test_nearest_is_no_farther_than_any_point() {
        let points: Vec<Vec3> = (0..20)
            .map(|i| {
                let f = i as f32;
                Vec3::new(f.sin() * 30.0, f * 0.5, f.cos() * 30.0)
            })
            .collect();
        let queries = [
            Vec3::ZERO,
            Vec3::new(12.0, -3.0, 7.0),
            Vec3::new(-40.0, 9.0, 2.0),
        ];
        for query in queries {
            let best = nearest_point(&points, query).unwrap();
            let d = points[best].distance(query);
            assert!(points.iter().all(|p| d <= p.distance(query)));
        }
    }
}
