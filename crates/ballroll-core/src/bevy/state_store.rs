//! Shared state stores for communication with the host page.
//!
//! Each store holds a specific slice of game state that can be polled
//! independently from JavaScript. The version counter lets the page skip
//! re-rendering when nothing it shows has changed.

use std::sync::Arc;

use bevy::prelude::Resource;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::controller::GamePhase;
use crate::level::SessionCard;

// ============================================================================
// Data Types
// ============================================================================

/// Session state summary for the page overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionSummary {
    pub level_name: String,
    pub phase: GamePhase,
    pub guide_visible: bool,
    /// Id of the checkpoint the ball is dwelling on.
    pub checkpoint_id: Option<String>,
    /// Card to display while dwelling.
    pub card: Option<SessionCard>,
    /// How far the ball has converged onto the capturing checkpoint, 0 to 1.
    pub checkpoint_progress: Option<f32>,
    /// Route to navigate to once the finish sequence is complete.
    pub finished_route: Option<String>,
    pub respawn_count: u32,
    pub ball_position: [f32; 3],
}

// ============================================================================
// Individual Stores
// ============================================================================

/// Store for the session summary.
#[derive(Debug, Default)]
pub struct SessionStore {
    summary: RwLock<SessionSummary>,
    version: RwLock<u64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_summary(&self) -> SessionSummary {
        self.summary.read().clone()
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    /// Replaces the summary. The version only moves when the content differs.
    pub fn update(&self, summary: SessionSummary) {
        let mut current = self.summary.write();
        if *current != summary {
            *current = summary;
            *self.version.write() += 1;
        }
    }

    pub fn set_ball_position(&self, position: [f32; 3]) {
        self.summary.write().ball_position = position;
        // Don't bump version for every frame (too frequent)
    }

    pub fn clear(&self) {
        *self.summary.write() = SessionSummary::default();
        *self.version.write() += 1;
    }
}

// ============================================================================
// Combined State Stores
// ============================================================================

/// All state stores combined, shared between Bevy and the host page.
#[derive(Debug, Clone, Resource)]
pub struct StateStores {
    pub session: Arc<SessionStore>,
}

impl StateStores {
    pub fn new() -> Self {
        Self {
            session: Arc::new(SessionStore::new()),
        }
    }
}

impl Default for StateStores {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_bumps_only_on_change() {
        let store = SessionStore::new();
        let summary = SessionSummary {
            level_name: "launch-track".to_string(),
            guide_visible: true,
            ..SessionSummary::default()
        };

        store.update(summary.clone());
        assert_eq!(store.get_version(), 1);
        store.update(summary);
        assert_eq!(store.get_version(), 1);
    }

    #[test]
    fn test_ball_position_does_not_bump_version() {
        let store = SessionStore::new();
        store.set_ball_position([1.0, 2.0, 3.0]);
        assert_eq!(store.get_version(), 0);
        assert_eq!(store.get_summary().ball_position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_summary_serializes_phase() {
        let summary = SessionSummary {
            phase: GamePhase::AtCheckpoint,
            ..SessionSummary::default()
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"phase\":\"AtCheckpoint\""));
    }

    #[test]
    fn test_stores_share_state_across_clones() {
        let stores = StateStores::new();
        let other = stores.clone();
        other.session.set_ball_position([0.0, 1.0, 0.0]);
        assert_eq!(stores.session.get_summary().ball_position, [0.0, 1.0, 0.0]);
    }
}
