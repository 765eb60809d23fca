//! Movement input: held keys and the on-screen joystick.
//!
//! Input is level-triggered. The bevy layer records key down and up edges
//! into an [`InputState`], and the controller reads the held set every frame.

use bevy::math::Vec2;

/// A movement direction bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [Self::Forward, Self::Back, Self::Left, Self::Right];

    const fn bit(self) -> u8 {
        match self {
            Self::Forward => 1,
            Self::Back => 1 << 1,
            Self::Left => 1 << 2,
            Self::Right => 1 << 3,
        }
    }
}

/// Movement intent for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    held: u8,
    /// Joystick vector, present only while the joystick is being dragged.
    pub joystick: Option<Vec2>,
}

impl Intent {
    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held & key.bit() != 0
    }

    pub fn any_key(&self) -> bool {
        self.held != 0
    }

    /// True when neither a key nor the joystick asks for movement.
    pub fn is_idle(&self) -> bool {
        !self.any_key() && self.joystick.is_none()
    }
}

/// Held movement keys and joystick vector.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: u8,
    joystick: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: MoveKey) {
        self.held |= key.bit();
    }

    pub fn release(&mut self, key: MoveKey) {
        self.held &= !key.bit();
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held & key.bit() != 0
    }

    /// Forgets every held key. The joystick is left alone since its finger
    /// is still physically down.
    pub fn clear_keys(&mut self) {
        self.held = 0;
    }

    /// Sets the joystick vector, clamped to the unit square.
    pub fn set_joystick(&mut self, v: Vec2) {
        self.joystick = Some(v.clamp(Vec2::splat(-1.0), Vec2::ONE));
    }

    pub fn release_joystick(&mut self) {
        self.joystick = None;
    }

    pub fn joystick(&self) -> Option<Vec2> {
        self.joystick
    }

    pub fn intent(&self) -> Intent {
        Intent {
            held: self.held,
            joystick: self.joystick,
        }
    }
}

/// Default drag distance in pixels that maps to full deflection.
pub const JOYSTICK_MAX_DISTANCE: f32 = 50.0;

/// Diameter of the on-screen control in pixels.
pub const JOYSTICK_SIZE: f32 = 150.0;

/// On-screen touch joystick.
///
/// A drag that starts inside the control is turned into a vector whose length
/// is the drag distance clamped to `max_distance`, divided by `max_distance`.
#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    /// Center of the control in window coordinates.
    pub center: Vec2,
    pub radius: f32,
    pub max_distance: f32,
    origin: Option<Vec2>,
    value: Vec2,
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl VirtualJoystick {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: JOYSTICK_SIZE / 2.0,
            max_distance: JOYSTICK_MAX_DISTANCE,
            origin: None,
            value: Vec2::ZERO,
        }
    }

    /// Places the control horizontally centered, its bottom edge 15% of the
    /// window height above the bottom.
    pub fn layout(&mut self, window_size: Vec2) {
        self.center = Vec2::new(
            window_size.x / 2.0,
            window_size.y * 0.85 - self.radius,
        );
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.distance(self.center) <= self.radius
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    pub fn value(&self) -> Vec2 {
        self.value
    }

    /// Starts a drag if `pos` is inside the control. Returns whether it did.
    pub fn touch_start(&mut self, pos: Vec2) -> bool {
        if !self.contains(pos) {
            return false;
        }
        self.origin = Some(pos);
        self.value = Vec2::ZERO;
        true
    }

    /// Updates the drag. Returns the new vector, or `None` when inactive.
    pub fn touch_move(&mut self, pos: Vec2) -> Option<Vec2> {
        let origin = self.origin?;
        let delta = pos - origin;
        let distance = delta.length();
        self.value = if distance > 0.0 {
            delta / distance * distance.min(self.max_distance) / self.max_distance
        } else {
            Vec2::ZERO
        };
        Some(self.value)
    }

    pub fn touch_end(&mut self) {
        self.origin = None;
        self.value = Vec2::ZERO;
    }
}

/// Whether a browser user agent belongs to a phone or tablet.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    ["android", "ipad", "iphone", "ipod"]
        .iter()
        .any(|needle| ua.contains(needle))
}
