//! Render sync systems.
//!
//! Copy the ball pose and chase camera from the controller onto their
//! render entities after each tick.

use bevy::prelude::*;

use crate::bevy::{BallMesh, ControllerRes, MainCamera};

/// System to copy the ball's position and rotation onto the ball mesh.
pub fn sync_ball_mesh(controller: Res<ControllerRes>, mut meshes: Query<&mut Transform, With<BallMesh>>) {
    let Some(pose) = controller.get().and_then(|c| c.ball_pose()) else {
        return;
    };

    for mut transform in &mut meshes {
        transform.translation = pose.position;
        transform.rotation = pose.rotation;
    }
}

/// System to place the main camera at the chase position, looking at the ball.
pub fn update_chase_camera(
    controller: Res<ControllerRes>,
    mut cameras: Query<&mut Transform, (With<MainCamera>, Without<BallMesh>)>,
) {
    let Some(controller) = controller.get() else {
        return;
    };
    let look = controller.camera().look_transform();

    for mut transform in &mut cameras {
        transform.translation = look.translation;
        transform.rotation = look.rotation;
    }
}
