use sdflab_engine::coords::{Rect, Vec2};
use sdflab_engine::paint::Color;
use sdflab_engine::scene::Border;
use sdflab_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

use super::arrow_direction;

/// Horizontal slider over `[min, max]` with a label and value readout above
/// the track.
///
/// Drag or click on the track to set the value; while hovered, arrow keys
/// and the wheel move it by one step. `on_change` fires on every change,
/// including mid-drag.
pub struct Slider {
    value: f32,
    min: f32,
    max: f32,
    step: f32,
    precision: usize,
    label: String,
    font: Option<FontId>,
    font_size: f32,
    text_color: Color,
    track_height: f32,
    thumb_radius: f32,
    track_color: Color,
    fill_color: Color,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            min: 0.0,
            max: 1.0,
            step: 0.0,
            precision: 2,
            label: String::new(),
            font: None,
            font_size: 12.0,
            text_color: Color::from_straight(0.9, 0.9, 0.92, 1.0),
            track_height: 4.0,
            thumb_radius: 6.0,
            track_color: Color::from_straight(0.15, 0.17, 0.22, 1.0),
            fill_color: Color::from_straight(0.2, 0.65, 1.0, 1.0),
            on_change: None,
        }
    }

    /// Sets the range; a reversed range is swapped.
    pub fn range(mut self, min: f32, max: f32) -> Self {
        (self.min, self.max) = if min <= max { (min, max) } else { (max, min) };
        self.value = self.value.clamp(self.min, self.max);
        self
    }

    /// Value shown initially, clamped to the range.
    pub fn value(mut self, v: f32) -> Self {
        self.value = v.clamp(self.min, self.max);
        self
    }

    /// Increment that user edits snap to; `0.0` means continuous.
    pub fn step(mut self, v: f32) -> Self {
        self.step = v.max(0.0);
        self
    }

    /// Decimal places in the readout.
    pub fn precision(mut self, v: usize) -> Self {
        self.precision = v;
        self
    }

    pub fn label(mut self, v: impl Into<String>) -> Self {
        self.label = v.into();
        self
    }

    pub fn font(mut self, v: Option<FontId>) -> Self {
        self.font = v;
        self
    }

    pub fn fill_color(mut self, v: Color) -> Self {
        self.fill_color = v;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Snaps `v` to the step grid anchored at `min`, then clamps.
    fn snap(&self, v: f32) -> f32 {
        let v = if self.step > 0.0 {
            self.min + ((v - self.min) / self.step).round() * self.step
        } else {
            v
        };
        v.clamp(self.min, self.max)
    }

    fn normalized(&self) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f32::EPSILON { 0.0 } else { ((self.value - self.min) / span).clamp(0.0, 1.0) }
    }

    fn label_height(&self) -> f32 {
        if self.font.is_some() { self.font_size * 1.2 } else { 0.0 }
    }

    /// The track row below the label, inset so the thumb stays inside `rect`.
    fn track_rect(&self, rect: Rect) -> Rect {
        let top = rect.origin.y + self.label_height();
        let r = self.thumb_radius;
        Rect::new(rect.origin.x + r, top, (rect.size.x - 2.0 * r).max(0.0), r * 2.0)
    }

    fn set(&mut self, v: f32) -> EventResult {
        let v = self.snap(v);
        if v != self.value {
            self.value = v;
            if let Some(f) = &mut self.on_change {
                f(v);
            }
        }
        EventResult::Consumed
    }

    fn value_at(&self, track: Rect, x: f32) -> f32 {
        let t = if track.size.x > 0.0 { ((x - track.origin.x) / track.size.x).clamp(0.0, 1.0) } else { 0.0 };
        self.min + t * (self.max - self.min)
    }

    fn nudge_amount(&self) -> f32 {
        if self.step > 0.0 { self.step } else { (self.max - self.min) * 0.01 }
    }

    fn readout(&self) -> String {
        format!("{:.*}", self.precision, self.value)
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Slider {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx<'_>) -> Vec2 {
        let w = if constraints.max.x.is_finite() { constraints.max.x } else { 150.0 };
        constraints.fit(Vec2::new(w, self.label_height() + self.thumb_radius * 2.0))
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        if let Some(font) = self.font {
            painter.text(self.label.as_str(), font, self.font_size, self.text_color, rect.origin, None);
            let readout = self.readout();
            let w = painter.measure_text(&readout, font, self.font_size, None).x;
            let origin = Vec2::new(rect.origin.x + rect.size.x - w, rect.origin.y);
            painter.text(readout, font, self.font_size, self.text_color, origin, None);
        }

        let row = self.track_rect(rect);
        let cy = row.origin.y + row.size.y * 0.5;
        let track = Rect::new(row.origin.x, cy - self.track_height * 0.5, row.size.x, self.track_height);
        painter.fill_rounded_rect(track, self.track_height * 0.5, self.track_color, None);

        let thumb_x = track.origin.x + self.normalized() * track.size.x;
        let fill = Rect::new(track.origin.x, track.origin.y, thumb_x - track.origin.x, track.size.y);
        if fill.size.x > 0.0 {
            painter.fill_rounded_rect(fill, self.track_height * 0.5, self.fill_color, None);
        }

        let r = if painter.is_hovered(rect) { self.thumb_radius + 1.0 } else { self.thumb_radius };
        painter.fill_circle(Vec2::new(thumb_x, cy), r, Color::WHITE, Some(Border::new(1.5, self.fill_color)));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        let track = self.track_rect(rect);
        match event {
            // Drags are owned by the slider the press started on.
            UiEvent::Drag { pos, start } | UiEvent::Release { pos, start } if rect.contains(*start) => {
                self.set(self.value_at(track, pos.x))
            }
            UiEvent::Key { key, pointer: Some(p), .. } if rect.contains(*p) => match arrow_direction(*key) {
                Some(dir) => self.set(self.value + dir * self.nudge_amount()),
                None => EventResult::Ignored,
            },
            UiEvent::Wheel { lines: delta, pointer } if rect.contains(*pointer) => {
                self.set(self.value - delta.signum() * self.nudge_amount())
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use sdflab_engine::input::Key;
    use sdflab_engine::text::FontSystem;

    use super::*;

    fn radius_slider() -> (Slider, Rc<RefCell<Vec<f32>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let s = Slider::new()
            .range(0.1, 100.0)
            .step(0.1)
            .value(4.0)
            .on_change(move |v| sink.borrow_mut().push(v));
        (s, seen)
    }

    // Without a font the track row is the whole rect: thumb radius 6, so
    // the track spans x in [6, 106) for a 112-wide rect.
    const RECT: Rect = Rect::new(0.0, 0.0, 112.0, 12.0);

    fn with_ctx(f: impl FnOnce(&LayoutCtx<'_>)) {
        let fonts = FontSystem::new();
        f(&LayoutCtx { fonts: &fonts, scale: 1.0 });
    }

    // ── dragging ──

    #[test]
    fn drag_sets_value_from_position() {
        with_ctx(|ctx| {
            let (mut s, seen) = radius_slider();
            let start = Vec2::new(10.0, 6.0);
            s.on_event(&UiEvent::Drag { pos: Vec2::new(56.0, 6.0), start }, RECT, ctx);
            let v = seen.borrow()[0];
            assert!((v - 50.0).abs() < 0.15, "got {v}");
        });
    }

    #[test]
    fn drag_past_ends_clamps() {
        with_ctx(|ctx| {
            let (mut s, seen) = radius_slider();
            let start = Vec2::new(10.0, 6.0);
            s.on_event(&UiEvent::Drag { pos: Vec2::new(-500.0, 6.0), start }, RECT, ctx);
            s.on_event(&UiEvent::Release { pos: Vec2::new(900.0, 6.0), start }, RECT, ctx);
            let seen = seen.borrow();
            assert!((seen[0] - 0.1).abs() < 1e-6);
            assert!((seen[1] - 100.0).abs() < 1e-4);
        });
    }

    #[test]
    fn drag_started_elsewhere_is_ignored() {
        with_ctx(|ctx| {
            let (mut s, seen) = radius_slider();
            let ev = UiEvent::Drag { pos: Vec2::new(50.0, 6.0), start: Vec2::new(50.0, 40.0) };
            assert!(!s.on_event(&ev, RECT, ctx).is_consumed());
            assert!(seen.borrow().is_empty());
        });
    }

    // ── stepping ──

    #[test]
    fn arrow_keys_step_while_hovered() {
        with_ctx(|ctx| {
            let (mut s, seen) = radius_slider();
            let key = |key| UiEvent::Key { key, pointer: Some(Vec2::new(20.0, 6.0)) };
            s.on_event(&key(Key::ArrowRight), RECT, ctx);
            s.on_event(&key(Key::ArrowDown), RECT, ctx);
            s.on_event(&key(Key::ArrowDown), RECT, ctx);
            let seen = seen.borrow();
            assert_eq!(seen.len(), 3);
            assert!((seen[0] - 4.1).abs() < 1e-4);
            assert!((seen[2] - 3.9).abs() < 1e-4);
        });
    }

    #[test]
    fn unrelated_key_is_not_consumed() {
        with_ctx(|ctx| {
            let (mut s, _) = radius_slider();
            let ev = UiEvent::Key { key: Key::Escape, pointer: Some(Vec2::new(20.0, 6.0)) };
            assert!(!s.on_event(&ev, RECT, ctx).is_consumed());
        });
    }

    #[test]
    fn wheel_down_decreases() {
        with_ctx(|ctx| {
            let (mut s, seen) = radius_slider();
            s.on_event(&UiEvent::Wheel { lines: 3.0, pointer: Vec2::new(20.0, 6.0) }, RECT, ctx);
            assert!((seen.borrow()[0] - 3.9).abs() < 1e-4);
        });
    }

    #[test]
    fn snapping_is_anchored_at_min() {
        let s = Slider::new().range(0.1, 100.0).step(0.1);
        assert!((s.snap(0.14) - 0.1).abs() < 1e-6);
        assert!((s.snap(0.16) - 0.2).abs() < 1e-6);
        assert_eq!(s.snap(-3.0), 0.1);
    }

    #[test]
    fn readout_uses_precision() {
        let s = Slider::new().range(0.0, 10.0).value(3.14159).precision(2);
        assert_eq!(s.readout(), "3.14");
    }
}
