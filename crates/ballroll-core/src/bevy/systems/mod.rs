//! Systems for the ballroll game.
//!
//! Organized by functionality:
//! - command: Command queue processing from WASM
//! - input: Keyboard and touch joystick input
//! - level_loader: Level loading and teardown
//! - scene: Camera, light and glTF scene spawning
//! - simulation: Per-frame controller tick and event publishing
//! - sync: Ball mesh and camera transforms
//! - track_loader: Track colliders from scene meshes
//! - state_sync: Sync ECS state to shared stores for the page

pub mod command;
pub mod input;
pub mod level_loader;
pub mod scene;
pub mod simulation;
pub mod state_sync;
pub mod sync;
pub mod track_loader;

pub use command::*;
pub use input::*;
pub use level_loader::*;
pub use scene::*;
pub use simulation::*;
pub use state_sync::*;
pub use sync::*;
pub use track_loader::*;
