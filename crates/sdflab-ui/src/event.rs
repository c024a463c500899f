use sdflab_engine::coords::Vec2;
use sdflab_engine::input::Key;

/// Input as a widget sees it. Positions are logical pixels.
///
/// Every widget receives every event; each decides by position whether it
/// is meant.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Pointer position, once per frame while inside the window.
    Hover { pos: Vec2 },
    /// Button held with the pointer at `pos`, after a press at `start`.
    Drag { pos: Vec2, start: Vec2 },
    /// Button let go at `pos` after a press at `start`, wherever `pos` is.
    Release { pos: Vec2, start: Vec2 },
    /// Sent right after [`UiEvent::Release`], at the release point.
    Click { pos: Vec2 },
    Key { key: Key, pointer: Option<Vec2> },
    /// Positive lines scroll down.
    Wheel { lines: f32, pointer: Vec2 },
}

/// Whether a widget used an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
