//! Bevy-based game engine for ballroll.
//!
//! This module drives the [`GameController`](crate::GameController) from an
//! ECS app: commands from the page, keyboard and touch input, the per-frame
//! tick, mesh and camera sync, track collider building and state stores for
//! the page overlay.

pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod state_store;
pub mod systems;

#[cfg(all(target_arch = "wasm32", feature = "windowed"))]
pub mod wasm_entry;

#[cfg(all(target_arch = "wasm32", feature = "windowed"))]
pub use wasm_entry::*;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

pub use components::*;
pub use events::*;
pub use plugin::{AppMode, BallrollHeadlessPlugin, BallrollPlugin};
pub use resources::*;
pub use state_store::{SessionStore, SessionSummary, StateStores};
