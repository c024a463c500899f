use std::collections::HashSet;

use super::types::{Key, MouseButton};

/// A key going down, auto-repeats included.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyPress {
    pub key: Key,
    pub repeat: bool,
}

/// What changed since the previous frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Key presses in arrival order.
    pub key_presses: Vec<KeyPress>,
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
    /// Wheel travel in lines; positive scrolls down.
    pub scroll_lines: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.key_presses.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.scroll_lines = 0.0;
    }
}
