//! State synchronization systems.
//!
//! Syncs Bevy ECS state to [`StateStores`] for the host page.

use bevy::prelude::*;

use crate::bevy::{BallRespawnedEvent, ControlGuide, ControllerRes, LevelLoadedEvent, SessionSummary, StateStores};
use crate::controller::GamePhase;

/// System to sync the session summary to the state stores.
///
/// Runs every frame. The store only bumps its version when something the
/// overlay shows has changed; the ball position is written separately.
pub fn sync_session_to_stores(
    controller: Res<ControllerRes>,
    guide: Res<ControlGuide>,
    state_stores: Res<StateStores>,
    mut loaded: MessageReader<LevelLoadedEvent>,
    mut respawned: MessageReader<BallRespawnedEvent>,
    mut respawn_count: Local<u32>,
) {
    if loaded.read().count() > 0 {
        *respawn_count = 0;
    }
    #[allow(clippy::cast_possible_truncation)]
    let respawns = respawned.read().count() as u32;
    *respawn_count += respawns;

    let Some(controller) = controller.get() else {
        return;
    };

    let phase = controller.phase();
    let summary = SessionSummary {
        level_name: controller.level().name.clone(),
        phase,
        guide_visible: guide.visible,
        checkpoint_id: controller.active_checkpoint().map(|c| c.id.clone()),
        card: controller.active_card().cloned(),
        checkpoint_progress: controller.checkpoint_progress(),
        finished_route: (phase == GamePhase::Finished).then(|| controller.level().finish_route.clone()),
        respawn_count: *respawn_count,
        ball_position: state_stores.session.get_summary().ball_position,
    };
    state_stores.session.update(summary);

    if let Some(pose) = controller.ball_pose() {
        state_stores.session.set_ball_position(pose.position.to_array());
    }
}
