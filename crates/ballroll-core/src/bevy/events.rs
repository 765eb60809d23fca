//! ECS Events (Messages) for the ballroll game.
//!
//! Controller notifications are republished as messages so that rendering,
//! UI and navigation systems can react to them.
//! Note: In Bevy 0.18+, buffered events use Message trait instead of Event.

use bevy::prelude::*;

use crate::level::{LevelConfig, SessionCard, TrackGeometry};

/// Message to request loading a level.
#[derive(Message, Debug, Clone)]
pub struct LoadLevelEvent {
    pub level: LevelConfig,
    /// Pre-baked track geometry. When absent the track comes from the
    /// level's scene meshes once they load.
    pub track: Option<TrackGeometry>,
}

/// Message fired when a level has been loaded.
#[derive(Message, Debug, Clone)]
pub struct LevelLoadedEvent {
    pub level_name: String,
    pub track_scene: Option<String>,
    pub ball_scene: Option<String>,
}

/// Message fired when the ball fell off and was respawned.
#[derive(Message, Debug, Clone)]
pub struct BallRespawnedEvent {
    pub point: usize,
    pub position: Vec3,
}

/// Message fired when the ball settles on a checkpoint.
#[derive(Message, Debug, Clone)]
pub struct CheckpointEnteredEvent {
    pub index: usize,
    pub checkpoint_id: String,
    /// Card to show while the ball dwells.
    pub card: Option<SessionCard>,
}

/// Message fired when the ball leaves a checkpoint.
#[derive(Message, Debug, Clone)]
pub struct CheckpointReleasedEvent {
    pub index: usize,
    pub checkpoint_id: String,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct PauseChangedEvent {
    pub paused: bool,
}

/// Message fired once when the ball reaches the goal box.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct GameWonEvent;

/// Message fired when the ball has settled on the goal and frozen.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct GoalReachedEvent;

/// Message requesting navigation away from the game.
#[derive(Message, Debug, Clone)]
pub struct NavigateEvent {
    pub route: String,
}

/// Message fired when the control guide overlay is dismissed.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct GuideDismissedEvent;
