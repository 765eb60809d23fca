//! Level configuration and static track colliders.
//!
//! A level is a JSON document listing the ball start, respawn points,
//! checkpoint markers, the goal and the promotional cards shown at each
//! checkpoint. Track geometry comes separately from the loaded scene meshes
//! and is turned into trimesh colliders by [`TrackGeometry::apply_to_world`].

use std::collections::HashSet;

use bevy::math::Vec3;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, Tuning};
use crate::physics::{PhysicsWorld, to_vector};

/// Error type for level and track loading.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level has no respawn points")]
    NoRespawnPoints,
    #[error("duplicate checkpoint id: '{0}'")]
    DuplicateCheckpoint(String),
    #[error("{kind} {index} at y = {y} is not above the fall threshold {threshold}")]
    BelowFallThreshold {
        kind: &'static str,
        index: usize,
        y: f32,
        threshold: f32,
    },
    #[error(transparent)]
    Tuning(#[from] ConfigError),
    #[error("mesh '{name}': vertex buffer length {len} is not a multiple of 3")]
    VertexBuffer { name: String, len: usize },
    #[error("mesh '{name}': index buffer length {len} is not a multiple of 3")]
    IndexBuffer { name: String, len: usize },
    #[error("mesh '{name}': index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        name: String,
        index: u32,
        vertex_count: usize,
    },
    #[error("mesh '{0}' has no triangles")]
    EmptyMesh(String),
    #[error("mesh '{name}': trimesh construction failed: {reason}")]
    Trimesh { name: String, reason: String },
}

/// A magnetic checkpoint marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub position: [f32; 3],
}

impl Checkpoint {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Promotional card displayed while the ball dwells on a checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCard {
    pub checkpoint_id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
}

fn default_finish_route() -> String {
    "/register".to_string()
}

/// Level configuration loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    pub ball_start: [f32; 3],
    pub respawn_points: Vec<[f32; 3]>,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    pub goal: [f32; 3],
    #[serde(default)]
    pub session_cards: Vec<SessionCard>,
    /// Route navigated to once the finish sequence completes.
    #[serde(default = "default_finish_route")]
    pub finish_route: String,
    /// Scene asset holding the track meshes.
    #[serde(default)]
    pub track_scene: Option<String>,
    /// Scene asset rendered as the ball. The game runs without it.
    #[serde(default)]
    pub ball_scene: Option<String>,
    #[serde(default)]
    pub tuning: Tuning,
}

impl LevelConfig {
    /// Parses and validates a level from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// The shipped track.
    /// Loaded from levels/default.json at compile time.
    pub fn default_track() -> Self {
        const DEFAULT_LEVEL_JSON: &str = include_str!("../levels/default.json");
        Self::from_json(DEFAULT_LEVEL_JSON).expect("Failed to parse default level JSON")
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if self.respawn_points.is_empty() {
            return Err(LevelError::NoRespawnPoints);
        }

        let mut seen = HashSet::new();
        for checkpoint in &self.checkpoints {
            if !seen.insert(checkpoint.id.as_str()) {
                return Err(LevelError::DuplicateCheckpoint(checkpoint.id.clone()));
            }
        }

        self.tuning.validate()?;

        let threshold = self.tuning.fall_threshold_y;
        let above = |kind: &'static str, index: usize, y: f32| {
            if y > threshold {
                Ok(())
            } else {
                Err(LevelError::BelowFallThreshold {
                    kind,
                    index,
                    y,
                    threshold,
                })
            }
        };
        for (index, point) in self.respawn_points.iter().enumerate() {
            above("respawn point", index, point[1])?;
        }
        for (index, checkpoint) in self.checkpoints.iter().enumerate() {
            above("checkpoint", index, checkpoint.position[1])?;
        }
        Ok(())
    }

    pub fn ball_start(&self) -> Vec3 {
        Vec3::from_array(self.ball_start)
    }

    pub fn goal(&self) -> Vec3 {
        Vec3::from_array(self.goal)
    }

    pub fn respawn_positions(&self) -> Vec<Vec3> {
        self.respawn_points
            .iter()
            .copied()
            .map(Vec3::from_array)
            .collect()
    }

    /// Looks up the card shown for a checkpoint id.
    pub fn card_for(&self, checkpoint_id: &str) -> Option<&SessionCard> {
        self.session_cards
            .iter()
            .find(|card| card.checkpoint_id == checkpoint_id)
    }
}

/// World-space triangle data of one track mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMeshData {
    pub name: String,
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<[u32; 3]>,
}

impl TrackMeshData {
    /// Builds mesh data from flat position and index buffers, as stored in
    /// baked geometry. Nothing is simplified or welded.
    pub fn from_flat_buffers(
        name: impl Into<String>,
        positions: &[f32],
        indices: &[u32],
    ) -> Result<Self, LevelError> {
        let name = name.into();

        if positions.len() % 3 != 0 {
            return Err(LevelError::VertexBuffer {
                name,
                len: positions.len(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(LevelError::IndexBuffer {
                name,
                len: indices.len(),
            });
        }

        let vertices: Vec<[f32; 3]> = positions
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        let indices: Vec<[u32; 3]> = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        let mesh = Self {
            name,
            vertices,
            indices,
        };
        mesh.check()?;
        Ok(mesh)
    }

    fn check(&self) -> Result<(), LevelError> {
        if self.indices.is_empty() {
            return Err(LevelError::EmptyMesh(self.name.clone()));
        }
        let vertex_count = self.vertices.len();
        for &index in self.indices.iter().flatten() {
            if index as usize >= vertex_count {
                return Err(LevelError::IndexOutOfRange {
                    name: self.name.clone(),
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Creates one immovable trimesh collider for this mesh.
    pub fn add_to_world(
        &self,
        world: &mut PhysicsWorld,
        tuning: &Tuning,
    ) -> Result<ColliderHandle, LevelError> {
        self.check()?;

        let vertices: Vec<Vector> = self
            .vertices
            .iter()
            .map(|&v| to_vector(Vec3::from_array(v)))
            .collect();

        let collider = ColliderBuilder::trimesh(vertices, self.indices.clone())
            .map_err(|e| LevelError::Trimesh {
                name: self.name.clone(),
                reason: format!("{e:?}"),
            })?
            .friction(tuning.friction)
            .restitution(tuning.restitution)
            .build();

        Ok(world.add_static_collider(collider))
    }
}

/// All static track meshes of a level.
#[derive(Debug, Clone, Default)]
pub struct TrackGeometry {
    pub meshes: Vec<TrackMeshData>,
}

impl TrackGeometry {
    pub fn new(meshes: Vec<TrackMeshData>) -> Self {
        Self { meshes }
    }

    /// Applies the track to a physics world.
    /// Meshes that fail to build are logged and skipped.
    pub fn apply_to_world(&self, world: &mut PhysicsWorld, tuning: &Tuning) -> Vec<ColliderHandle> {
        let mut handles = Vec::with_capacity(self.meshes.len());

        for mesh in &self.meshes {
            match mesh.add_to_world(world, tuning) {
                Ok(handle) => handles.push(handle),
                Err(e) => tracing::warn!("[track] Skipping mesh: {e}"),
            }
        }

        tracing::info!(
            "[track] Built {} of {} track colliders",
            handles.len(),
            self.meshes.len()
        );
        handles
    }
}
