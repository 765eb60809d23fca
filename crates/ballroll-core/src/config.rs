//! Gameplay tuning parameters.
//!
//! Every field has a default matching the shipped track, so a level file only
//! needs to list the values it overrides.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Error type for tuning parameter loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` = {value} is out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Physics and gameplay constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Track surface friction.
    pub friction: f32,
    /// Track surface restitution.
    pub restitution: f32,
    /// Velocity added per held direction per 60 Hz frame.
    pub move_force: f32,
    /// Horizontal velocity multiplier per 60 Hz frame without input.
    pub damping_factor: f32,
    pub capture_radius: f32,
    pub inner_radius: f32,
    pub attraction_strength: f32,
    /// Fraction of the remaining distance covered per 60 Hz frame while
    /// converging on a checkpoint or the goal.
    pub lerp_factor: f32,
    pub snap_epsilon: f32,
    pub dwell_duration_ms: u32,
    pub fall_threshold_y: f32,
    pub respawn_height_offset: f32,
    /// Half-extent of the goal arrival box on each axis.
    pub arrival_tolerance: f32,
    pub finish_pause_ms: u32,
    pub lift_step: f32,
    pub lift_height: f32,
    /// Contact normals further than this from vertical count as steep slopes.
    pub slope_limit_deg: f32,
    pub slope_linear_damping: f32,
    pub slope_angular_damping: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    /// Chase camera offset from the ball.
    pub camera_offset: [f32; 3],
    /// Upper bound on physics steps taken in a single frame.
    pub max_substeps: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: 0.1,
            restitution: 0.3,
            move_force: 0.1,
            damping_factor: 0.989,
            capture_radius: 3.0,
            inner_radius: 0.8,
            attraction_strength: 0.05,
            lerp_factor: 0.08,
            snap_epsilon: 0.01,
            dwell_duration_ms: 800,
            fall_threshold_y: -1.0,
            respawn_height_offset: 2.0,
            arrival_tolerance: 1.0,
            finish_pause_ms: 500,
            lift_step: 0.05,
            lift_height: 6.0,
            slope_limit_deg: 35.0,
            slope_linear_damping: 0.9,
            slope_angular_damping: 0.8,
            ball_radius: 0.5,
            ball_mass: 20.0,
            camera_offset: [6.0, 8.0, -8.0],
            max_substeps: 4,
        }
    }
}

impl Tuning {
    /// Parses and validates tuning from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Checks that every value keeps the simulation well behaved.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("move_force", self.move_force)?;
        positive("capture_radius", self.capture_radius)?;
        positive("inner_radius", self.inner_radius)?;
        positive("snap_epsilon", self.snap_epsilon)?;
        positive("arrival_tolerance", self.arrival_tolerance)?;
        positive("lift_step", self.lift_step)?;
        positive("ball_radius", self.ball_radius)?;
        positive("ball_mass", self.ball_mass)?;
        non_negative("friction", self.friction)?;
        non_negative("restitution", self.restitution)?;
        non_negative("attraction_strength", self.attraction_strength)?;
        non_negative("lift_height", self.lift_height)?;
        decay("damping_factor", self.damping_factor)?;
        unit_open("lerp_factor", self.lerp_factor)?;
        decay("slope_linear_damping", self.slope_linear_damping)?;
        decay("slope_angular_damping", self.slope_angular_damping)?;

        if self.inner_radius > self.capture_radius {
            return Err(ConfigError::OutOfRange {
                field: "inner_radius",
                value: self.inner_radius,
                reason: "must not exceed capture_radius",
            });
        }
        if !(0.0..=90.0).contains(&self.slope_limit_deg) {
            return Err(ConfigError::OutOfRange {
                field: "slope_limit_deg",
                value: self.slope_limit_deg,
                reason: "must be between 0 and 90 degrees",
            });
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::OutOfRange {
                field: "max_substeps",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    pub fn camera_offset(&self) -> Vec3 {
        Vec3::from_array(self.camera_offset)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be positive",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must not be negative",
        })
    }
}

fn unit_open(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be in (0, 1]",
        })
    }
}

/// Per-frame multipliers that must shrink velocity every frame.
fn decay(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be in (0, 1)",
        })
    }
}
