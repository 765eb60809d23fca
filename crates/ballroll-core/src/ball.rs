//! The player ball body.

use bevy::math::{Quat, Vec3};
use rapier3d::prelude::*;

use crate::config::Tuning;
use crate::physics::{PhysicsWorld, to_vec3, to_vector};

/// Point-in-time view of the ball body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallState {
    pub position: Vec3,
    pub rotation: Quat,
    pub linvel: Vec3,
    pub angvel: Vec3,
    pub mass: f32,
}

/// Handles of the ball body living in a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    pub radius: f32,
}

impl Ball {
    /// Spawns a dynamic ball at `position`.
    pub fn spawn(world: &mut PhysicsWorld, position: Vec3, tuning: &Tuning) -> Self {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(to_vector(position))
            .can_sleep(false)
            .ccd_enabled(true)
            .build();
        let body_handle = world.add_rigid_body(rigid_body);

        let collider = ColliderBuilder::ball(tuning.ball_radius)
            .friction(tuning.friction)
            .restitution(tuning.restitution)
            .mass(tuning.ball_mass)
            .build();
        let collider_handle = world.add_collider(collider, body_handle);

        tracing::debug!(
            "[ball] Spawned at ({:.2}, {:.2}, {:.2})",
            position.x,
            position.y,
            position.z
        );

        Self {
            body_handle,
            collider_handle,
            radius: tuning.ball_radius,
        }
    }

    pub fn snapshot(&self, world: &PhysicsWorld) -> Option<BallState> {
        let body = world.get_rigid_body(self.body_handle)?;
        let r = body.rotation();
        Some(BallState {
            position: to_vec3(&body.translation()),
            rotation: Quat::from_xyzw(r.x, r.y, r.z, r.w),
            linvel: to_vec3(&body.linvel()),
            angvel: to_vec3(&body.angvel()),
            mass: if body.is_kinematic() { 0.0 } else { body.mass() },
        })
    }

    pub fn position(&self, world: &PhysicsWorld) -> Option<Vec3> {
        world
            .get_rigid_body(self.body_handle)
            .map(|body| to_vec3(&body.translation()))
    }

    pub fn linvel(&self, world: &PhysicsWorld) -> Option<Vec3> {
        world
            .get_rigid_body(self.body_handle)
            .map(|body| to_vec3(&body.linvel()))
    }

    pub fn angvel(&self, world: &PhysicsWorld) -> Option<Vec3> {
        world
            .get_rigid_body(self.body_handle)
            .map(|body| to_vec3(&body.angvel()))
    }

    /// Mass of the body. A frozen ball reports zero.
    pub fn mass(&self, world: &PhysicsWorld) -> Option<f32> {
        world
            .get_rigid_body(self.body_handle)
            .map(|body| if body.is_kinematic() { 0.0 } else { body.mass() })
    }

    pub fn set_position(&self, world: &mut PhysicsWorld, position: Vec3) {
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_translation(to_vector(position), true);
            if body.is_kinematic() {
                body.set_next_kinematic_translation(to_vector(position));
            }
        }
    }

    pub fn set_linvel(&self, world: &mut PhysicsWorld, linvel: Vec3) {
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_linvel(to_vector(linvel), true);
        }
    }

    pub fn set_angvel(&self, world: &mut PhysicsWorld, angvel: Vec3) {
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_angvel(to_vector(angvel), true);
        }
    }

    /// Zeroes linear and angular velocity.
    pub fn stop(&self, world: &mut PhysicsWorld) {
        self.set_linvel(world, Vec3::ZERO);
        self.set_angvel(world, Vec3::ZERO);
    }

    pub fn suspend_gravity(&self, world: &mut PhysicsWorld) {
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_gravity_scale(0.0, true);
        }
    }

    pub fn restore_gravity(&self, world: &mut PhysicsWorld) {
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_gravity_scale(1.0, true);
        }
    }

    /// Makes the ball position-driven: it stops responding to gravity,
    /// contacts and forces, and reports zero mass.
    pub fn freeze(&self, world: &mut PhysicsWorld) {
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_linvel(Vector::new(0.0, 0.0, 0.0), false);
            body.set_angvel(Vector::new(0.0, 0.0, 0.0), false);
            body.set_body_type(RigidBodyType::KinematicPositionBased, true);
        }
    }

    pub fn is_frozen(&self, world: &PhysicsWorld) -> bool {
        world
            .get_rigid_body(self.body_handle)
            .is_some_and(RigidBody::is_kinematic)
    }

    /// Schedules an upward move of a frozen ball, applied on the next step.
    pub fn lift_by(&self, world: &mut PhysicsWorld, dy: f32) {
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            let t = body.translation();
            body.set_next_kinematic_translation(Vector::new(t.x, t.y + dy, t.z));
        }
    }
}
