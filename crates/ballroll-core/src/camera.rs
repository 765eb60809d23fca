//! Chase camera placed at a fixed offset from the ball.

use bevy::math::Vec3;
use bevy::transform::components::Transform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseCamera {
    pub offset: Vec3,
    pub position: Vec3,
    pub target: Vec3,
}

impl ChaseCamera {
    pub fn new(offset: Vec3, ball: Vec3) -> Self {
        let mut camera = Self {
            offset,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
        };
        camera.follow(ball);
        camera
    }

    /// Snaps to `ball + offset` looking at the ball. No smoothing.
    pub fn follow(&mut self, ball: Vec3) {
        self.position = ball + self.offset;
        self.target = ball;
    }

    /// Transform looking at the target with +Y up.
    pub fn look_transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.target, Vec3::Y)
    }
}
