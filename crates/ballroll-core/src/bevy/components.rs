//! ECS Components for the ballroll game.

use bevy::prelude::*;
use rapier3d::prelude::ColliderHandle;

/// Render entity mirroring the physics ball.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BallMesh;

/// Marker component for the main game camera.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MainCamera;

/// Root of the loaded track scene. Meshes below it become colliders.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TrackScene;

/// A mesh entity under a [`TrackScene`] that feeds the track colliders.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TrackMesh;

/// Result of building a [`TrackMesh`] into the physics world.
///
/// `None` marks a mesh that was skipped because its geometry was unusable.
#[derive(Component, Debug, Clone, Copy)]
pub struct TrackCollider(pub Option<ColliderHandle>);

/// Sun light spawned with the game scene.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SceneLight;
