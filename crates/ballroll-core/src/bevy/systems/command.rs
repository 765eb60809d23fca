//! Command processing system.
//!
//! Processes commands from the JavaScript/WASM interface.

use bevy::prelude::*;

use crate::bevy::systems::GameEventWriters;
use crate::bevy::{AppMode, CommandQueue, ControllerRes, GameCommand, LoadLevelEvent, PhysicsWorldRes};

/// System to process all commands from the external command queue.
///
/// Handles commands until a Yield is encountered.
/// Commands after Yield are processed in the next frame.
pub fn process_commands(
    command_queue: Res<CommandQueue>,
    physics: Res<PhysicsWorldRes>,
    mut controller: ResMut<ControllerRes>,
    mut next_mode: ResMut<NextState<AppMode>>,
    mut load_level_events: MessageWriter<LoadLevelEvent>,
    mut writers: GameEventWriters,
) {
    for command in command_queue.drain_until_yield() {
        match command {
            GameCommand::InitGame => {
                tracing::info!("[command] InitGame");
                next_mode.set(AppMode::Game);
            }
            GameCommand::ClearMode => {
                tracing::info!("[command] ClearMode");
                next_mode.set(AppMode::Idle);
            }
            GameCommand::LoadLevel { level, track } => {
                tracing::info!(
                    "[command] LoadLevel '{}' ({} baked meshes)",
                    level.name,
                    track.as_ref().map_or(0, |t| t.meshes.len())
                );
                load_level_events.write(LoadLevelEvent { level: *level, track });
            }
            GameCommand::Pause | GameCommand::Resume | GameCommand::TogglePause => {
                let Some(controller) = controller.get_mut() else {
                    tracing::warn!("[command] {command:?} ignored, no level loaded");
                    continue;
                };
                let event = match command {
                    GameCommand::Pause => controller.pause(),
                    GameCommand::Resume => controller.resume(),
                    _ => controller.toggle_pause(),
                };
                if let Some(event) = event {
                    writers.publish(event, controller.level());
                }
            }
            GameCommand::LogBallPosition => {
                if let Some(controller) = controller.get() {
                    controller.log_ball_position(&physics.world);
                }
            }
            // Yield is consumed by drain_until_yield(), should not reach here
            GameCommand::Yield => {}
        }
    }
}
