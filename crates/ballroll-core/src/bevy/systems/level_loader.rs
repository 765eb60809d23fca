//! Level loading and teardown systems.

use bevy::prelude::*;

use crate::bevy::{
    BallMesh, ControlGuide, ControllerRes, InputStateRes, LevelLoadedEvent, LevelRes,
    LoadLevelEvent, PhysicsWorldRes, SceneLight, StateStores, TrackScene,
};
use crate::controller::GameController;

/// System to handle [`LoadLevelEvent`].
///
/// Replaces the physics world contents with the new level. The previous
/// level's scene entities are despawned; scene systems spawn the new ones
/// after [`LevelLoadedEvent`].
#[allow(clippy::too_many_arguments)]
pub fn handle_load_level(
    mut commands: Commands,
    mut events: MessageReader<LoadLevelEvent>,
    mut physics: ResMut<PhysicsWorldRes>,
    mut controller: ResMut<ControllerRes>,
    mut level_res: ResMut<LevelRes>,
    mut input: ResMut<InputStateRes>,
    mut guide: ResMut<ControlGuide>,
    scene_entities: Query<Entity, Or<(With<TrackScene>, With<BallMesh>)>>,
    mut loaded_events: MessageWriter<LevelLoadedEvent>,
) {
    // Only the last request of a frame matters.
    let Some(event) = events.read().last().cloned() else {
        return;
    };

    for entity in scene_entities.iter() {
        commands.entity(entity).despawn();
    }
    physics.world.reset();
    controller.0 = None;
    input.0 = Default::default();

    let level = event.level;
    let game = match GameController::new(&mut physics.world, level.clone()) {
        Ok(game) => game,
        Err(e) => {
            tracing::error!("[level] Failed to load '{}': {e}", level.name);
            level_res.0 = None;
            return;
        }
    };

    if let Some(track) = &event.track {
        track.apply_to_world(&mut physics.world, &level.tuning);
    }

    tracing::info!("[level] Loaded '{}'", level.name);
    loaded_events.write(LevelLoadedEvent {
        level_name: level.name.clone(),
        track_scene: level.track_scene.clone(),
        ball_scene: level.ball_scene.clone(),
    });

    controller.0 = Some(game);
    level_res.0 = Some(level);
    guide.visible = true;
}

/// Cleans up all game entities when leaving Game mode.
///
/// The camera is kept alive to avoid destroying GPU textures while render
/// commands still reference them. Entering Game mode again reconfigures it.
#[allow(clippy::too_many_arguments)]
pub fn cleanup_game_mode(
    mut commands: Commands,
    scene_entities: Query<Entity, Or<(With<TrackScene>, With<BallMesh>, With<SceneLight>)>>,
    mut physics: ResMut<PhysicsWorldRes>,
    mut controller: ResMut<ControllerRes>,
    mut level_res: ResMut<LevelRes>,
    mut input: ResMut<InputStateRes>,
    mut guide: ResMut<ControlGuide>,
    state_stores: Option<Res<StateStores>>,
) {
    tracing::info!("[ballroll] cleanup_game_mode");

    for entity in scene_entities.iter() {
        commands.entity(entity).despawn();
    }

    controller.0 = None;
    level_res.0 = None;
    input.0 = Default::default();
    *guide = ControlGuide::default();
    physics.world.reset();

    if let Some(stores) = state_stores {
        stores.session.clear();
    }
}
