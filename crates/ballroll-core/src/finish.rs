//! Win detection and the end-of-level sequence.
//!
//! Reaching the goal box latches the win once per session. The ball then
//! converges onto the goal, freezes, pauses, and is lifted with world gravity
//! off until it reaches the lift height.

use bevy::math::Vec3;

use crate::ball::Ball;
use crate::checkpoint::scaled_lerp;
use crate::config::Tuning;
use crate::physics::PhysicsWorld;

/// Whether `position` lies inside the axis-aligned box of half-extent
/// `tolerance` around `goal`.
pub fn within_arrival(position: Vec3, goal: Vec3, tolerance: f32) -> bool {
    let d = (position - goal).abs();
    d.x < tolerance && d.y < tolerance && d.z < tolerance
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FinishStage {
    Converging,
    Pausing { elapsed_ms: f32 },
    Lifting { lifted: f32 },
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishUpdate {
    Idle,
    GoalReached,
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct FinishSequence {
    latched: bool,
    stage: Option<FinishStage>,
}

impl FinishSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn stage(&self) -> Option<FinishStage> {
        self.stage
    }

    /// Latches the win if the ball is in the goal box. Fires at most once.
    pub fn try_trigger(
        &mut self,
        world: &mut PhysicsWorld,
        ball: &Ball,
        goal: Vec3,
        tuning: &Tuning,
    ) -> bool {
        if self.latched {
            return false;
        }
        let Some(position) = ball.position(world) else {
            return false;
        };
        if !within_arrival(position, goal, tuning.arrival_tolerance) {
            return false;
        }

        self.latched = true;
        self.stage = Some(FinishStage::Converging);
        ball.suspend_gravity(world);
        ball.stop(world);
        tracing::info!("[finish] Goal reached, starting finish sequence");
        true
    }

    /// Advances the sequence by one frame.
    pub fn advance(
        &mut self,
        world: &mut PhysicsWorld,
        ball: &Ball,
        goal: Vec3,
        tuning: &Tuning,
        dt: f32,
        scale: f32,
    ) -> FinishUpdate {
        let Some(stage) = self.stage else {
            return FinishUpdate::Idle;
        };

        match stage {
            FinishStage::Converging => {
                let Some(position) = ball.position(world) else {
                    return FinishUpdate::Idle;
                };
                let moved = position + (goal - position) * scaled_lerp(tuning.lerp_factor, scale);
                ball.stop(world);

                if goal.distance(moved) < tuning.snap_epsilon {
                    ball.set_position(world, goal);
                    ball.freeze(world);
                    self.stage = Some(FinishStage::Pausing { elapsed_ms: 0.0 });
                    return FinishUpdate::GoalReached;
                }
                ball.set_position(world, moved);
                FinishUpdate::Idle
            }
            FinishStage::Pausing { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + dt * 1000.0;
                #[allow(clippy::cast_precision_loss)]
                let pause_ms = tuning.finish_pause_ms as f32;
                if elapsed_ms >= pause_ms {
                    world.set_gravity_enabled(false);
                    self.stage = Some(FinishStage::Lifting { lifted: 0.0 });
                    tracing::debug!("[finish] Lifting");
                    return FinishUpdate::Idle;
                }
                self.stage = Some(FinishStage::Pausing { elapsed_ms });
                FinishUpdate::Idle
            }
            FinishStage::Lifting { lifted } => {
                let rise = (tuning.lift_step * scale).min(tuning.lift_height - lifted);
                ball.lift_by(world, rise);
                world.step();
                let lifted = lifted + rise;

                if lifted >= tuning.lift_height - tuning.lift_step / 2.0 {
                    self.stage = Some(FinishStage::Done);
                    tracing::info!("[finish] Finish sequence complete");
                    return FinishUpdate::Finished;
                }
                self.stage = Some(FinishStage::Lifting { lifted });
                FinishUpdate::Idle
            }
            FinishStage::Done => FinishUpdate::Idle,
        }
    }
}
