//! Keyboard and touch input systems.
//!
//! Key presses and releases are edge-triggered into [`InputState`] so that a
//! respawn, which clears the held keys, stays cleared until the next press.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bevy::{ControlGuide, GuideDismissedEvent, InputStateRes, JoystickRes};
use crate::input::{InputState, MoveKey};

/// Movement key bound to a physical key, WASD or arrows.
pub fn move_key_for(code: KeyCode) -> Option<MoveKey> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(MoveKey::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(MoveKey::Back),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(MoveKey::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(MoveKey::Right),
        _ => None,
    }
}

/// Applies one frame of key edges to the input state.
pub fn apply_key_edges<'a>(
    input: &mut InputState,
    pressed: impl IntoIterator<Item = &'a KeyCode>,
    released: impl IntoIterator<Item = &'a KeyCode>,
) {
    for key in pressed.into_iter().filter_map(|&code| move_key_for(code)) {
        input.press(key);
    }
    for key in released.into_iter().filter_map(|&code| move_key_for(code)) {
        input.release(key);
    }
}

fn dismiss_guide(guide: &mut ControlGuide, dismissed: &mut MessageWriter<GuideDismissedEvent>) {
    if guide.visible {
        guide.visible = false;
        tracing::debug!("[input] Control guide dismissed");
        dismissed.write(GuideDismissedEvent);
    }
}

/// System to read the keyboard into [`InputStateRes`].
///
/// The first key press of any kind dismisses the control guide.
pub fn read_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<InputStateRes>,
    mut guide: ResMut<ControlGuide>,
    mut dismissed: MessageWriter<GuideDismissedEvent>,
) {
    if keys.get_just_pressed().next().is_some() {
        dismiss_guide(&mut guide, &mut dismissed);
    }
    apply_key_edges(&mut input.0, keys.get_just_pressed(), keys.get_just_released());
}

impl JoystickRes {
    /// Claims the joystick for a new touch if it lands on the control.
    pub fn begin(&mut self, id: u64, pos: Vec2) -> bool {
        if self.touch_id.is_some() || !self.joystick.touch_start(pos) {
            return false;
        }
        self.touch_id = Some(id);
        true
    }

    /// Drags with the owning touch. Other touches are ignored.
    pub fn drag(&mut self, id: u64, pos: Vec2) -> Option<Vec2> {
        if self.touch_id != Some(id) {
            return None;
        }
        self.joystick.touch_move(pos)
    }

    /// Releases the joystick if `id` owns it.
    pub fn end(&mut self, id: u64) -> bool {
        if self.touch_id != Some(id) {
            return false;
        }
        self.touch_id = None;
        self.joystick.touch_end();
        true
    }
}

/// System to drive the on-screen joystick from touches.
pub fn read_touch_joystick(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut joystick: ResMut<JoystickRes>,
    mut input: ResMut<InputStateRes>,
    mut guide: ResMut<ControlGuide>,
    mut dismissed: MessageWriter<GuideDismissedEvent>,
) {
    if !joystick.enabled {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    joystick.joystick.layout(Vec2::new(window.width(), window.height()));

    for touch in touches.iter_just_pressed() {
        if joystick.begin(touch.id(), touch.position()) {
            dismiss_guide(&mut guide, &mut dismissed);
            input.0.set_joystick(Vec2::ZERO);
        }
    }

    for touch in touches.iter() {
        if let Some(value) = joystick.drag(touch.id(), touch.position()) {
            input.0.set_joystick(value);
        }
    }

    for touch in touches.iter_just_released().chain(touches.iter_just_canceled()) {
        if joystick.end(touch.id()) {
            input.0.release_joystick();
        }
    }
}
