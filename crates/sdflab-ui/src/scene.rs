use sdflab_engine::coords::{Rect, Vec2};
use sdflab_engine::input::{InputFrame, InputState, Key, KeyPress, MouseButton};
use sdflab_engine::scene::DrawList;
use sdflab_engine::text::FontSystem;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Element;

// ── UiInput ───────────────────────────────────────────────────────────────

/// Input for one overlay frame. Only the left button drives widgets.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Logical pixels; `None` while the pointer is outside the window.
    pub mouse_pos: Option<Vec2>,
    pub mouse_pressed: bool,
    pub mouse_went_down: bool,
    pub mouse_released: bool,
    /// Arrival order, auto-repeats included.
    pub keys_pressed: Vec<KeyPress>,
    /// Lines; positive scrolls down.
    pub scroll_delta: f32,
}

impl UiInput {
    /// Reads the window's input after this frame's events were applied.
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        Self {
            mouse_pos: state.pointer_pos.map(|(x, y)| Vec2::new(x, y)),
            mouse_pressed: state.button_down(MouseButton::Left),
            mouse_went_down: frame.buttons_pressed.contains(&MouseButton::Left),
            mouse_released: frame.buttons_released.contains(&MouseButton::Left),
            keys_pressed: frame.key_presses.clone(),
            scroll_delta: frame.scroll_lines,
        }
    }
}

// ── UiResponse ────────────────────────────────────────────────────────────

/// What the overlay took from this frame's input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiResponse {
    /// Pointer was over the root area or a drag that began there is active.
    pub pointer_captured: bool,
    /// Keys some widget handled; the rest fall through to the application.
    pub consumed_keys: Vec<Key>,
}

impl UiResponse {
    pub fn consumed_key(&self, key: Key) -> bool {
        self.consumed_keys.contains(&key)
    }
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Runs one widget tree per frame: measure, route input, paint.
///
/// Events are routed before painting, so a widget that changes its value in
/// `on_event` is drawn with the new value in the same frame.
pub struct UiScene {
    pub font_system: FontSystem,
    /// Filled by [`frame`](Self::frame); public so it can be split-borrowed
    /// alongside `font_system` when handed to the renderers.
    pub draw_list: DrawList,
    drag_start: Option<Vec2>,
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

impl UiScene {
    pub fn new() -> Self {
        Self { font_system: FontSystem::new(), draw_list: DrawList::new(), drag_start: None }
    }

    /// True while a press that began inside the overlay is still held.
    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Lays `root` out at the top-left of `area`, sized to its content, and
    /// returns the rect it occupies together with the input it consumed.
    pub fn frame(&mut self, mut root: Element, area: Rect, input: &UiInput, scale: f32) -> (Rect, UiResponse) {
        self.draw_list.clear();
        let ctx = LayoutCtx { fonts: &self.font_system, scale };

        let size = root.measure(Constraints::up_to(area.size), &ctx);
        let rect = Rect::new(area.origin.x, area.origin.y, size.x, size.y);
        let over = input.mouse_pos.is_some_and(|p| rect.contains(p));

        // ── events ────────────────────────────────────────────────────────
        let mut response = UiResponse { pointer_captured: over || self.drag_start.is_some(), ..UiResponse::default() };

        if input.mouse_went_down && over {
            self.drag_start = input.mouse_pos;
            response.pointer_captured = true;
        }

        if let Some(pos) = input.mouse_pos {
            root.on_event(&UiEvent::Hover { pos }, rect, &ctx);

            if let Some(start) = self.drag_start {
                if input.mouse_pressed && !input.mouse_released {
                    root.on_event(&UiEvent::Drag { pos, start }, rect, &ctx);
                }
            }
            if input.mouse_released {
                if let Some(start) = self.drag_start.take() {
                    root.on_event(&UiEvent::Release { pos, start }, rect, &ctx);
                    root.on_event(&UiEvent::Click { pos }, rect, &ctx);
                }
            }
            if input.scroll_delta != 0.0 && over {
                root.on_event(&UiEvent::Wheel { lines: input.scroll_delta, pointer: pos }, rect, &ctx);
            }
        } else if input.mouse_released || !input.mouse_pressed {
            self.drag_start = None;
        }

        for k in &input.keys_pressed {
            let ev = UiEvent::Key { key: k.key, pointer: input.mouse_pos };
            if root.on_event(&ev, rect, &ctx).is_consumed() && !response.consumed_keys.contains(&k.key) {
                response.consumed_keys.push(k.key);
            }
        }

        // ── paint ─────────────────────────────────────────────────────────
        let mut painter = Painter::new(&mut self.draw_list, &self.font_system, input.mouse_pos, scale);
        root.paint(&mut painter, rect);

        (rect, response)
    }
}
