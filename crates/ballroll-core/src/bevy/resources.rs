//! ECS Resources for the ballroll game.
//!
//! These resources hold shared game state and configuration.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::controller::GameController;
use crate::input::{InputState, VirtualJoystick};
use crate::level::{LevelConfig, TrackGeometry};
use crate::physics::PhysicsWorld;

/// Resource wrapping the physics world.
#[derive(Resource, Default)]
pub struct PhysicsWorldRes {
    pub world: PhysicsWorld,
}

/// The running game loop. `None` until a level has been loaded.
#[derive(Resource, Default)]
pub struct ControllerRes(pub Option<GameController>);

impl ControllerRes {
    pub fn get(&self) -> Option<&GameController> {
        self.0.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut GameController> {
        self.0.as_mut()
    }
}

/// Held movement keys and joystick vector.
#[derive(Resource, Default)]
pub struct InputStateRes(pub InputState);

/// On-screen joystick for touch devices.
#[derive(Resource, Default)]
pub struct JoystickRes {
    pub joystick: VirtualJoystick,
    /// Touch currently driving the joystick.
    pub touch_id: Option<u64>,
    /// Only shown on phones and tablets.
    pub enabled: bool,
}

impl JoystickRes {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

/// Control guide overlay shown until the first key press.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ControlGuide {
    pub visible: bool,
}

impl Default for ControlGuide {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Level currently loaded, kept for scene spawning.
#[derive(Resource, Default)]
pub struct LevelRes(pub Option<LevelConfig>);

/// Commands that can be sent from JavaScript to the Bevy app.
#[derive(Debug, Clone)]
pub enum GameCommand {
    /// Enter game mode.
    InitGame,
    /// Leave game mode and tear down the level.
    ClearMode,
    /// Load a level, optionally with pre-baked track geometry.
    LoadLevel {
        level: Box<LevelConfig>,
        track: Option<TrackGeometry>,
    },
    Pause,
    Resume,
    TogglePause,
    /// Log the current ball coordinates.
    LogBallPosition,
    /// Frame boundary marker - commands after this are processed in the next frame.
    Yield,
}

/// Thread-safe command queue for WASM interop.
///
/// This allows JavaScript to push commands that will be processed
/// by Bevy systems on the next frame.
#[derive(Resource, Clone)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<GameCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Push a command to be processed.
    pub fn push(&self, command: GameCommand) {
        self.inner.lock().push_back(command);
    }

    /// Drain all pending commands.
    pub fn drain(&self) -> Vec<GameCommand> {
        self.inner.lock().drain(..).collect()
    }

    /// Drain commands until Yield or empty.
    ///
    /// Returns commands up to (not including) Yield.
    /// Yield itself is consumed but not returned.
    pub fn drain_until_yield(&self) -> Vec<GameCommand> {
        let mut guard = self.inner.lock();
        let mut commands = Vec::new();

        while let Some(cmd) = guard.pop_front() {
            if matches!(cmd, GameCommand::Yield) {
                tracing::debug!("[command] Yield - deferring remaining commands to next frame");
                break;
            }
            commands.push(cmd);
        }

        commands
    }

    /// Check if there are pending commands.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Clear all pending commands.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
