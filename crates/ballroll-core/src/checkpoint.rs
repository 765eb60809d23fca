//! Checkpoint attraction and the attach / dwell / release cycle.
//!
//! While free, the ball is pulled toward every armed checkpoint within the
//! capture radius. The first checkpoint whose inner radius it enters captures
//! it: gravity is suspended and the ball converges geometrically onto the
//! marker, snaps, dwells, and is released. A released checkpoint stays
//! disarmed until the ball has left its capture radius.

use bevy::math::Vec3;

use crate::ball::Ball;
use crate::config::Tuning;
use crate::level::Checkpoint;
use crate::physics::PhysicsWorld;

/// Fraction of the remaining offset covered in one frame of `scale` 60 Hz
/// frames, for a per-frame factor of `lerp_factor`.
pub fn scaled_lerp(lerp_factor: f32, scale: f32) -> f32 {
    1.0 - (1.0 - lerp_factor).powf(scale)
}

/// Stage of an active attachment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttachStage {
    /// Moving onto the marker. `progress` runs from 0 to 1.
    Converging { start_distance: f32, progress: f32 },
    /// Sitting on the marker.
    Dwelling { elapsed_ms: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attachment {
    pub index: usize,
    pub stage: AttachStage,
}

/// Outcome of one tracker update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointUpdate {
    Idle,
    /// Ball entered the inner radius of checkpoint `index`.
    Captured(usize),
    /// Ball snapped onto the marker and started dwelling.
    Entered(usize),
    /// Dwell finished, ball released.
    Released(usize),
}

#[derive(Debug, Clone, Default)]
pub struct CheckpointTracker {
    attached: Option<Attachment>,
    disarmed: Vec<bool>,
}

impl CheckpointTracker {
    pub fn new(checkpoint_count: usize) -> Self {
        Self {
            attached: None,
            disarmed: vec![false; checkpoint_count],
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn is_armed(&self, index: usize) -> bool {
        !self.disarmed.get(index).copied().unwrap_or(false)
    }

    /// Index of the checkpoint the ball is dwelling on.
    pub fn dwelling_on(&self) -> Option<usize> {
        match self.attached {
            Some(Attachment {
                index,
                stage: AttachStage::Dwelling { .. },
            }) => Some(index),
            _ => None,
        }
    }

    /// Convergence progress of the current attachment, 1 once dwelling.
    pub fn progress(&self) -> Option<f32> {
        self.attached.map(|a| match a.stage {
            AttachStage::Converging { progress, .. } => progress,
            AttachStage::Dwelling { .. } => 1.0,
        })
    }

    /// Runs one frame of checkpoint logic.
    pub fn update(
        &mut self,
        world: &mut PhysicsWorld,
        ball: &Ball,
        checkpoints: &[Checkpoint],
        tuning: &Tuning,
        dt: f32,
        scale: f32,
    ) -> CheckpointUpdate {
        let Some(position) = ball.position(world) else {
            return CheckpointUpdate::Idle;
        };

        match self.attached {
            None => self.attract(world, ball, position, checkpoints, tuning, scale),
            Some(attachment) => {
                let Some(checkpoint) = checkpoints.get(attachment.index) else {
                    self.detach(world, ball);
                    return CheckpointUpdate::Idle;
                };
                self.advance(world, ball, position, attachment, checkpoint.position(), tuning, dt, scale)
            }
        }
    }

    fn attract(
        &mut self,
        world: &mut PhysicsWorld,
        ball: &Ball,
        position: Vec3,
        checkpoints: &[Checkpoint],
        tuning: &Tuning,
        scale: f32,
    ) -> CheckpointUpdate {
        if self.disarmed.len() < checkpoints.len() {
            self.disarmed.resize(checkpoints.len(), false);
        }

        let mut pull = Vec3::ZERO;
        let mut captured = None;

        for (index, checkpoint) in checkpoints.iter().enumerate() {
            let offset = checkpoint.position() - position;
            let distance = offset.length();

            if self.disarmed[index] {
                if distance > tuning.capture_radius {
                    self.disarmed[index] = false;
                    tracing::debug!("[checkpoint] Re-armed '{}'", checkpoint.id);
                }
                continue;
            }
            if distance > tuning.capture_radius {
                continue;
            }

            pull += offset * tuning.attraction_strength * scale;
            if captured.is_none() && distance < tuning.inner_radius {
                captured = Some((index, distance));
            }
        }

        if let Some((index, distance)) = captured {
            ball.suspend_gravity(world);
            ball.stop(world);
            self.attached = Some(Attachment {
                index,
                stage: AttachStage::Converging {
                    start_distance: distance,
                    progress: 0.0,
                },
            });
            tracing::debug!("[checkpoint] Captured by '{}'", checkpoints[index].id);
            return CheckpointUpdate::Captured(index);
        }

        if pull != Vec3::ZERO
            && let Some(linvel) = ball.linvel(world)
        {
            ball.set_linvel(world, linvel + pull);
        }
        CheckpointUpdate::Idle
    }

    #[allow(clippy::too_many_arguments)]
    fn advance(
        &mut self,
        world: &mut PhysicsWorld,
        ball: &Ball,
        position: Vec3,
        attachment: Attachment,
        target: Vec3,
        tuning: &Tuning,
        dt: f32,
        scale: f32,
    ) -> CheckpointUpdate {
        let index = attachment.index;

        match attachment.stage {
            AttachStage::Converging { start_distance, .. } => {
                let offset = target - position;
                let moved = position + offset * scaled_lerp(tuning.lerp_factor, scale);
                let remaining = target.distance(moved);
                ball.stop(world);

                if remaining < tuning.snap_epsilon {
                    ball.set_position(world, target);
                    self.attached = Some(Attachment {
                        index,
                        stage: AttachStage::Dwelling { elapsed_ms: 0.0 },
                    });
                    return CheckpointUpdate::Entered(index);
                }

                ball.set_position(world, moved);
                let progress = if start_distance > 0.0 {
                    (1.0 - remaining / start_distance).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                self.attached = Some(Attachment {
                    index,
                    stage: AttachStage::Converging {
                        start_distance,
                        progress,
                    },
                });
                CheckpointUpdate::Idle
            }
            AttachStage::Dwelling { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + dt * 1000.0;
                ball.set_position(world, target);
                ball.stop(world);

                #[allow(clippy::cast_precision_loss)]
                let dwell_ms = tuning.dwell_duration_ms as f32;
                if elapsed_ms >= dwell_ms {
                    self.detach(world, ball);
                    if let Some(flag) = self.disarmed.get_mut(index) {
                        *flag = true;
                    }
                    return CheckpointUpdate::Released(index);
                }

                self.attached = Some(Attachment {
                    index,
                    stage: AttachStage::Dwelling { elapsed_ms },
                });
                CheckpointUpdate::Idle
            }
        }
    }

    fn detach(&mut self, world: &mut PhysicsWorld, ball: &Ball) {
        self.attached = None;
        ball.restore_gravity(world);
    }
}
