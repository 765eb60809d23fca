//! Ballroll Core Library
//!
//! Ball physics and game loop logic for a 3D roll-to-the-goal game using
//! `Rapier3D`.
//!
//! The simulation core (physics world, ball, checkpoints, finish sequence and
//! the frame controller) is plain Rust and runs without a window. The `bevy`
//! module drives it from an ECS app and hosts it in the browser.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod ball;
pub mod camera;
pub mod checkpoint;
pub mod config;
pub mod controller;
pub mod finish;
pub mod input;
pub mod level;
pub mod movement;
pub mod physics;
pub mod respawn;

// Bevy integration
pub mod bevy;

pub use ball::{Ball, BallState};
pub use camera::ChaseCamera;
pub use checkpoint::{AttachStage, CheckpointTracker, CheckpointUpdate};
pub use config::{ConfigError, Tuning};
pub use controller::{GameController, GameEvent, GamePhase};
pub use finish::{FinishSequence, FinishStage, FinishUpdate};
pub use input::{InputState, Intent, MoveKey, VirtualJoystick, is_mobile_user_agent};
pub use level::{Checkpoint, LevelConfig, LevelError, SessionCard, TrackGeometry, TrackMeshData};
pub use physics::{PHYSICS_DT, PhysicsWorld, default_gravity};
pub use respawn::nearest_point;
