//! Per-frame game loop system.
//!
//! Ticks the [`GameController`](crate::GameController) with the frame delta
//! and republishes its notifications as messages.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::bevy::{
    BallRespawnedEvent, CheckpointEnteredEvent, CheckpointReleasedEvent, ControllerRes,
    GameWonEvent, GoalReachedEvent, InputStateRes, NavigateEvent, PauseChangedEvent,
    PhysicsWorldRes,
};
use crate::controller::GameEvent;
use crate::level::LevelConfig;

/// Writers for every message a controller notification maps to.
#[derive(SystemParam)]
pub struct GameEventWriters<'w> {
    respawned: MessageWriter<'w, BallRespawnedEvent>,
    entered: MessageWriter<'w, CheckpointEnteredEvent>,
    released: MessageWriter<'w, CheckpointReleasedEvent>,
    paused: MessageWriter<'w, PauseChangedEvent>,
    won: MessageWriter<'w, GameWonEvent>,
    goal: MessageWriter<'w, GoalReachedEvent>,
    navigate: MessageWriter<'w, NavigateEvent>,
}

impl GameEventWriters<'_> {
    pub fn publish(&mut self, event: GameEvent, level: &LevelConfig) {
        match event {
            GameEvent::Respawned { point, position } => {
                self.respawned.write(BallRespawnedEvent { point, position });
            }
            GameEvent::CheckpointEntered { index, id } => {
                let card = level.card_for(&id).cloned();
                self.entered.write(CheckpointEnteredEvent {
                    index,
                    checkpoint_id: id,
                    card,
                });
            }
            GameEvent::CheckpointReleased { index, id } => {
                self.released.write(CheckpointReleasedEvent {
                    index,
                    checkpoint_id: id,
                });
            }
            GameEvent::PauseChanged { paused } => {
                self.paused.write(PauseChangedEvent { paused });
            }
            GameEvent::WinTriggered => {
                self.won.write(GameWonEvent);
            }
            GameEvent::GoalReached => {
                self.goal.write(GoalReachedEvent);
            }
            GameEvent::Finished { route } => {
                tracing::info!("[ballroll] Finished, navigating to {route}");
                self.navigate.write(NavigateEvent { route });
            }
        }
    }
}

/// System to run one controller tick per rendered frame.
pub fn run_controller(
    time: Res<Time>,
    mut physics: ResMut<PhysicsWorldRes>,
    mut controller: ResMut<ControllerRes>,
    mut input: ResMut<InputStateRes>,
    mut writers: GameEventWriters,
) {
    let Some(controller) = controller.get_mut() else {
        return;
    };

    let events = controller.tick(&mut physics.world, &mut input.0, time.delta_secs());
    for event in events {
        writers.publish(event, controller.level());
    }
}
