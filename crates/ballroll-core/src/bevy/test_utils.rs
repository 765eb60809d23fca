//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `BallrollHeadlessPlugin` for testing game logic
//! without a rendering or windowing backend.

use std::time::Duration;

use bevy::ecs::message::{MessageCursor, Messages};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::bevy::plugin::BallrollHeadlessPlugin;
use crate::bevy::resources::{CommandQueue, ControllerRes, GameCommand, PhysicsWorldRes};
use crate::bevy::state_store::StateStores;
use crate::controller::GameController;
use crate::level::{LevelConfig, TrackGeometry};
use crate::physics::PHYSICS_DT;

/// A headless Bevy app wrapper for testing.
///
/// Every update advances time by exactly one 60 Hz frame, so a frame of the
/// app is a frame of the game loop.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);
        app.add_plugins(bevy::input::InputPlugin);
        app.add_plugins(BallrollHeadlessPlugin::default());
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            PHYSICS_DT,
        )));
        // Run one update to initialize all resources and state
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Run `n` frame updates.
    pub fn update_n(&mut self, n: usize) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Run `n` frame updates, collecting every `M` written along the way.
    pub fn update_collecting<M: Message + Clone>(&mut self, n: usize) -> Vec<M> {
        let mut cursor: MessageCursor<M> = self.world().resource::<Messages<M>>().get_cursor_current();
        let mut seen = Vec::new();
        for _ in 0..n {
            self.app.update();
            let messages = self.world().resource::<Messages<M>>();
            seen.extend(cursor.read(messages).cloned());
        }
        seen
    }

    /// Transition to Game mode and run an update to apply the state change.
    pub fn enter_game_mode(&mut self) {
        self.push_command(GameCommand::InitGame);
        self.update();
        // Extra update to process OnEnter systems
        self.update();
    }

    /// Push a command to the command queue.
    pub fn push_command(&mut self, cmd: GameCommand) {
        self.app.world().resource::<CommandQueue>().push(cmd);
    }

    /// Load a level and run an update so it is processed.
    pub fn load_level(&mut self, level: LevelConfig, track: Option<TrackGeometry>) {
        self.push_command(GameCommand::LoadLevel {
            level: Box::new(level),
            track,
        });
        self.update();
    }

    pub fn controller(&self) -> Option<&GameController> {
        self.world().resource::<ControllerRes>().get()
    }

    pub fn physics(&self) -> &PhysicsWorldRes {
        self.world().resource::<PhysicsWorldRes>()
    }

    pub fn stores(&self) -> &StateStores {
        self.world().resource::<StateStores>()
    }

    /// Get a reference to the World.
    pub fn world(&self) -> &World {
        self.app.world()
    }

    /// Get a mutable reference to the World.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
