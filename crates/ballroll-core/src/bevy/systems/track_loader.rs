//! Track collider building from loaded scene meshes.
//!
//! Every mesh below a [`TrackScene`] becomes one immovable trimesh collider
//! built from its world-space triangles. Meshes with unusable geometry are
//! logged and skipped without stopping the rest of the track.

use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::prelude::*;

use crate::bevy::{ControllerRes, PhysicsWorldRes, TrackCollider, TrackMesh, TrackScene};
use crate::level::{LevelError, TrackMeshData};

/// Converts a render mesh into world-space track data.
///
/// Non-indexed meshes are treated as sequential triangles.
pub fn track_mesh_from_bevy(
    name: &str,
    mesh: &Mesh,
    transform: &GlobalTransform,
) -> Result<TrackMeshData, LevelError> {
    if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
        return Err(LevelError::Trimesh {
            name: name.to_string(),
            reason: format!("unsupported topology {:?}", mesh.primitive_topology()),
        });
    }
    let Some(VertexAttributeValues::Float32x3(positions)) = mesh.attribute(Mesh::ATTRIBUTE_POSITION) else {
        return Err(LevelError::EmptyMesh(name.to_string()));
    };

    let flat: Vec<f32> = positions
        .iter()
        .flat_map(|&p| transform.transform_point(Vec3::from_array(p)).to_array())
        .collect();

    let indices: Vec<u32> = match mesh.indices() {
        Some(Indices::U16(indices)) => indices.iter().map(|&i| u32::from(i)).collect(),
        Some(Indices::U32(indices)) => indices.clone(),
        #[allow(clippy::cast_possible_truncation)]
        None => (0..positions.len() as u32).collect(),
    };

    TrackMeshData::from_flat_buffers(name, &flat, &indices)
}

/// System to tag mesh entities spawned under a track scene.
pub fn tag_track_meshes(
    mut commands: Commands,
    roots: Query<Entity, With<TrackScene>>,
    children: Query<&Children>,
    untagged: Query<(), (With<Mesh3d>, Without<TrackMesh>)>,
) {
    for root in &roots {
        for entity in children.iter_descendants(root) {
            if untagged.contains(entity) {
                commands.entity(entity).insert(TrackMesh);
            }
        }
    }
}

/// System to build colliders for tagged track meshes whose assets are ready.
pub fn build_track_colliders(
    mut commands: Commands,
    pending: Query<(Entity, &Mesh3d, &GlobalTransform, Option<&Name>), (With<TrackMesh>, Without<TrackCollider>)>,
    mesh_assets: Res<Assets<Mesh>>,
    controller: Res<ControllerRes>,
    mut physics: ResMut<PhysicsWorldRes>,
) {
    let Some(controller) = controller.get() else {
        return;
    };

    for (entity, mesh3d, transform, name) in &pending {
        // Still loading
        let Some(mesh) = mesh_assets.get(&mesh3d.0) else {
            continue;
        };
        let name = name.map_or_else(|| format!("{entity}"), |n| n.as_str().to_string());

        let built = track_mesh_from_bevy(&name, mesh, transform)
            .and_then(|data| data.add_to_world(&mut physics.world, controller.tuning()));

        let handle = match built {
            Ok(handle) => {
                tracing::debug!("[track] Built collider for '{name}'");
                Some(handle)
            }
            Err(e) => {
                tracing::warn!("[track] Skipping mesh: {e}");
                None
            }
        };
        commands.entity(entity).insert(TrackCollider(handle));
    }
}
