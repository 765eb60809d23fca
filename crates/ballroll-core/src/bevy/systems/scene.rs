//! Camera, light and glTF scene spawning. Needs a renderer.

use bevy::prelude::*;

use crate::bevy::{BallMesh, LevelLoadedEvent, LevelRes, MainCamera, SceneLight, TrackScene};

/// Sets up or reconfigures the camera for Game mode.
///
/// Reuses existing camera entity to avoid destroying GPU textures
/// mid-frame (which causes "Destroyed texture used in a submit" errors).
pub fn setup_game_camera(
    mut commands: Commands,
    mut existing: Query<&mut Transform, With<MainCamera>>,
    lights: Query<(), With<SceneLight>>,
) {
    let home = Transform::from_xyz(6.0, 8.0, -8.0).looking_at(Vec3::ZERO, Vec3::Y);

    if let Ok(mut transform) = existing.single_mut() {
        *transform = home;
        tracing::info!("[ballroll] game camera reconfigured");
    } else {
        commands.spawn((Camera3d::default(), home, MainCamera));
        tracing::info!("[ballroll] game camera spawned");
    }

    if lights.is_empty() {
        commands.spawn((
            DirectionalLight {
                illuminance: 10000.0,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
            SceneLight,
        ));
    }
}

/// System to spawn the track and ball scenes once a level is loaded.
///
/// A level without a ball scene gets a plain sphere.
pub fn spawn_level_scenes(
    mut commands: Commands,
    mut events: MessageReader<LevelLoadedEvent>,
    level: Res<LevelRes>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if events.read().last().is_none() {
        return;
    }
    let Some(level) = level.0.as_ref() else {
        return;
    };

    if let Some(path) = &level.track_scene {
        tracing::info!("[scene] Loading track scene {path}");
        commands.spawn((
            SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()))),
            Transform::default(),
            TrackScene,
        ));
    }

    let start = Transform::from_translation(level.ball_start());
    match &level.ball_scene {
        Some(path) => {
            tracing::info!("[scene] Loading ball scene {path}");
            commands.spawn((
                SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()))),
                start,
                BallMesh,
            ));
        }
        None => {
            commands.spawn((
                Mesh3d(meshes.add(Sphere::new(level.tuning.ball_radius))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.85, 0.2, 0.2),
                    ..default()
                })),
                start,
                BallMesh,
            ));
        }
    }
}
