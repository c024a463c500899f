use std::collections::HashSet;

use super::frame::{InputFrame, KeyPress};
use super::types::{InputEvent, MouseButton};

/// Held buttons and the pointer position.
#[derive(Debug, Default)]
pub struct InputState {
    /// Logical pixels; `None` while the pointer is outside the window.
    pub pointer_pos: Option<(f32, f32)>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev` and records the transition it caused in `frame`.
    pub fn apply(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Key { key, pressed: true, repeat } => frame.key_presses.push(KeyPress { key, repeat }),
            InputEvent::Key { pressed: false, .. } => {}
            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((x, y)),
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::Button { button, pressed: true } => {
                if self.buttons_down.insert(button) {
                    frame.buttons_pressed.insert(button);
                }
            }
            InputEvent::Button { button, pressed: false } => {
                if self.buttons_down.remove(&button) {
                    frame.buttons_released.insert(button);
                }
            }
            InputEvent::Wheel { lines } => frame.scroll_lines += lines,
            // No releases reach an unfocused window.
            InputEvent::Focused(false) => self.buttons_down.clear(),
            InputEvent::Focused(true) => {}
        }
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    fn apply_all(events: &[InputEvent]) -> (InputState, InputFrame) {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for ev in events {
            state.apply(&mut frame, *ev);
        }
        (state, frame)
    }

    fn key(key: Key, pressed: bool, repeat: bool) -> InputEvent {
        InputEvent::Key { key, pressed, repeat }
    }

    fn left(pressed: bool) -> InputEvent {
        InputEvent::Button { button: MouseButton::Left, pressed }
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn repeats_keep_their_flag() {
        let (_, f) = apply_all(&[key(Key::Escape, true, false), key(Key::Escape, true, true)]);
        assert_eq!(f.key_presses.len(), 2);
        assert!(!f.key_presses[0].repeat);
        assert!(f.key_presses[1].repeat);
    }

    #[test]
    fn releases_are_not_presses() {
        let (_, f) = apply_all(&[key(Key::Space, true, false), key(Key::Space, false, false)]);
        assert_eq!(f.key_presses, vec![KeyPress { key: Key::Space, repeat: false }]);
    }

    #[test]
    fn losing_focus_lifts_buttons() {
        let (s, _) = apply_all(&[left(true), InputEvent::Focused(false)]);
        assert!(s.buttons_down.is_empty());
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn button_transitions_are_recorded_once() {
        let (s, f) = apply_all(&[left(true), left(true)]);
        assert!(s.button_down(MouseButton::Left));
        assert_eq!(f.buttons_pressed.len(), 1);

        let (_, f) = apply_all(&[left(false)]);
        assert!(f.buttons_released.is_empty(), "release without press");
    }

    #[test]
    fn pointer_tracks_moves_until_it_leaves() {
        let (s, _) = apply_all(&[InputEvent::PointerMoved { x: 3.0, y: 4.0 }]);
        assert_eq!(s.pointer_pos, Some((3.0, 4.0)));
        let (s, _) = apply_all(&[InputEvent::PointerMoved { x: 3.0, y: 4.0 }, InputEvent::PointerLeft]);
        assert_eq!(s.pointer_pos, None);
    }

    #[test]
    fn wheel_sums_until_cleared() {
        let (_, mut f) = apply_all(&[InputEvent::Wheel { lines: 1.0 }, InputEvent::Wheel { lines: 2.0 }]);
        assert_eq!(f.scroll_lines, 3.0);
        f.clear();
        assert_eq!(f.scroll_lines, 0.0);
    }
}
