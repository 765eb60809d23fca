//! Camera-relative movement forces and damping.
//!
//! All per-frame factors are expressed for a 60 Hz frame and scaled by
//! `frame_scale = dt / PHYSICS_DT`, so additive terms grow linearly and
//! multiplicative ones are raised to that power.

use bevy::math::{Vec2, Vec3};

use crate::ball::Ball;
use crate::config::Tuning;
use crate::input::{Intent, MoveKey};
use crate::physics::{PHYSICS_DT, PhysicsWorld};

/// Converts a frame duration into a multiple of the 60 Hz reference frame.
pub fn frame_scale(dt: f32) -> f32 {
    dt / PHYSICS_DT
}

/// Horizontal forward and right unit vectors as seen from the camera.
///
/// Forward points from the camera toward the ball on the XZ plane. A camera
/// straight above the ball falls back to world -Z forward.
pub fn camera_basis(ball: Vec3, camera: Vec3) -> (Vec3, Vec3) {
    let flat = Vec3::new(ball.x - camera.x, 0.0, ball.z - camera.z);
    let forward = flat.try_normalize().unwrap_or(Vec3::NEG_Z);
    let right = forward.cross(Vec3::Y);
    (forward, right)
}

/// Velocity change requested by `intent` for one frame.
pub fn intent_delta(intent: &Intent, basis: (Vec3, Vec3), move_force: f32, scale: f32) -> Vec3 {
    let (forward, right) = basis;
    let step = move_force * scale;
    let mut delta = Vec3::ZERO;

    if intent.is_held(MoveKey::Forward) {
        delta += forward * step;
    }
    if intent.is_held(MoveKey::Back) {
        delta -= forward * step;
    }
    if intent.is_held(MoveKey::Right) {
        delta += right * step;
    }
    if intent.is_held(MoveKey::Left) {
        delta -= right * step;
    }

    // Screen-down is +y, so pulling the stick down moves the ball back.
    if let Some(Vec2 { x, y }) = intent.joystick {
        delta += (forward * -y + right * x) * step;
    }

    delta
}

/// Applies the movement intent to the ball velocity, or damps horizontal
/// velocity when there is no intent.
pub fn apply_intent(
    world: &mut PhysicsWorld,
    ball: &Ball,
    intent: &Intent,
    basis: (Vec3, Vec3),
    tuning: &Tuning,
    scale: f32,
) {
    let Some(mut linvel) = ball.linvel(world) else {
        return;
    };

    if intent.is_idle() {
        let damping = tuning.damping_factor.powf(scale);
        linvel.x *= damping;
        linvel.z *= damping;
    } else {
        linvel += intent_delta(intent, basis, tuning.move_force, scale);
    }

    ball.set_linvel(world, linvel);
}

/// Whether a contact normal is steeper than `limit_deg` from vertical.
pub fn is_steep(normal: Vec3, limit_deg: f32) -> bool {
    let Some(n) = normal.try_normalize() else {
        return false;
    };
    n.y < limit_deg.to_radians().cos()
}

/// Damps the ball while it touches a steep surface. Returns whether damping
/// was applied.
pub fn apply_slope_damping(
    world: &mut PhysicsWorld,
    ball: &Ball,
    tuning: &Tuning,
    scale: f32,
) -> bool {
    let steep = world
        .contact_normals(ball.collider_handle)
        .into_iter()
        .any(|n| is_steep(n, tuning.slope_limit_deg));
    if !steep {
        return false;
    }

    let (Some(mut linvel), Some(mut angvel)) = (ball.linvel(world), ball.angvel(world)) else {
        return false;
    };

    let linear = tuning.slope_linear_damping.powf(scale);
    let angular = tuning.slope_angular_damping.powf(scale);
    linvel.x *= linear;
    linvel.z *= linear;
    angvel.x *= angular;
    angvel.z *= angular;

    ball.set_linvel(world, linvel);
    ball.set_angvel(world, angvel);
    true
}
