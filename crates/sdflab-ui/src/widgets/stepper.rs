use sdflab_engine::coords::{Rect, Vec2};
use sdflab_engine::paint::Color;
use sdflab_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

use super::arrow_direction;

/// Integer field with − / + buttons on the right and a label on the left.
///
/// While hovered, arrow keys and the wheel step the value too.
pub struct Stepper {
    value: i32,
    min: i32,
    max: i32,
    step: i32,
    label: String,
    font: Option<FontId>,
    font_size: f32,
    text_color: Color,
    button_size: f32,
    button_color: Color,
    value_width: f32,
    on_change: Option<Box<dyn FnMut(i32)>>,
}

impl Stepper {
    pub fn new() -> Self {
        Self {
            value: 0,
            min: i32::MIN,
            max: i32::MAX,
            step: 1,
            label: String::new(),
            font: None,
            font_size: 12.0,
            text_color: Color::from_straight(0.9, 0.9, 0.92, 1.0),
            button_size: 14.0,
            button_color: Color::from_straight(0.2, 0.22, 0.28, 1.0),
            value_width: 22.0,
            on_change: None,
        }
    }

    pub fn range(mut self, min: i32, max: i32) -> Self {
        (self.min, self.max) = if min <= max { (min, max) } else { (max, min) };
        self.value = self.value.clamp(self.min, self.max);
        self
    }

    pub fn value(mut self, v: i32) -> Self {
        self.value = v.clamp(self.min, self.max);
        self
    }

    pub fn step(mut self, v: i32) -> Self {
        self.step = v.max(1);
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

    pub fn button_color(mut self, v: Color) -> Self {
        self.button_color = v;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(i32) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// `(minus, value, plus)` areas at the right edge of `rect`.
    fn parts(&self, rect: Rect) -> (Rect, Rect, Rect) {
        let b = self.button_size;
        let y = rect.origin.y + (rect.size.y - b) * 0.5;
        let right = rect.origin.x + rect.size.x;
        let plus = Rect::new(right - b, y, b, b);
        let value = Rect::new(plus.origin.x - self.value_width, y, self.value_width, b);
        let minus = Rect::new(value.origin.x - b, y, b, b);
        (minus, value, plus)
    }

    fn bump(&mut self, dir: i32) -> EventResult {
        let v = self.value.saturating_add(dir.saturating_mul(self.step)).clamp(self.min, self.max);
        if v != self.value {
            self.value = v;
            if let Some(f) = &mut self.on_change {
                f(v);
            }
        }
        EventResult::Consumed
    }
}

impl Default for Stepper {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Stepper {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let label_w = match self.font {
            Some(f) if !self.label.is_empty() => ctx.measure_text(&self.label, f, self.font_size, None).x + 6.0,
            _ => 0.0,
        };
        let controls_w = 2.0 * self.button_size + self.value_width;
        let w = if constraints.max.x.is_finite() { constraints.max.x } else { label_w + controls_w };
        constraints.fit(Vec2::new(w, self.button_size.max(self.font_size * 1.2)))
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        let (minus, value, plus) = self.parts(rect);
        let text_y = rect.origin.y + (rect.size.y - self.font_size * 1.2) * 0.5;

        for (button, enabled) in [(minus, self.value > self.min), (plus, self.value < self.max)] {
            let color = match (enabled, painter.is_hovered(button)) {
                (false, _) => self.button_color.darken(0.3),
                (true, true) => self.button_color.lighten(0.15),
                (true, false) => self.button_color,
            };
            painter.fill_rounded_rect(button, 2.0, color, None);
        }

        // Glyph-free − and + so the control reads without a font.
        let bar = self.button_size * 0.5;
        let t = 2.0;
        for button in [minus, plus] {
            let c = button.center();
            painter.fill_rect(Rect::new(c.x - bar * 0.5, c.y - t * 0.5, bar, t), self.text_color);
        }
        let c = plus.center();
        painter.fill_rect(Rect::new(c.x - t * 0.5, c.y - bar * 0.5, t, bar), self.text_color);

        if let Some(font) = self.font {
            let digits = self.value.to_string();
            let w = painter.measure_text(&digits, font, self.font_size, None).x;
            let origin = Vec2::new(value.origin.x + (value.size.x - w) * 0.5, text_y);
            painter.text(digits, font, self.font_size, self.text_color, origin, None);

            if !self.label.is_empty() {
                let max_w = (minus.origin.x - rect.origin.x).max(0.0);
                let origin = Vec2::new(rect.origin.x, text_y);
                painter.text(self.label.as_str(), font, self.font_size, self.text_color, origin, Some(max_w));
            }
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        let (minus, _, plus) = self.parts(rect);
        match event {
            UiEvent::Click { pos } if minus.contains(*pos) => self.bump(-1),
            UiEvent::Click { pos } if plus.contains(*pos) => self.bump(1),
            UiEvent::Key { key, pointer: Some(p), .. } if rect.contains(*p) => match arrow_direction(*key) {
                Some(dir) => self.bump(dir as i32),
                None => EventResult::Ignored,
            },
            UiEvent::Wheel { lines: delta, pointer } if rect.contains(*pointer) => {
                self.bump(-(delta.signum() as i32))
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

    const RECT: Rect = Rect::new(0.0, 0.0, 150.0, 16.0);

    fn tex_pow(value: i32) -> (Stepper, Rc<RefCell<Vec<i32>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let s = Stepper::new().range(2, 6).value(value).on_change(move |v| sink.borrow_mut().push(v));
        (s, seen)
    }

    fn click(s: &mut Stepper, part: Rect) -> EventResult {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        s.on_event(&UiEvent::Click { pos: part.center() }, RECT, &ctx)
    }

    #[test]
    fn buttons_sit_at_the_right_edge() {
        let (s, _) = tex_pow(5);
        let (minus, value, plus) = s.parts(RECT);
        assert_eq!(plus.max().x, 150.0);
        assert_eq!(value.max().x, plus.origin.x);
        assert_eq!(minus.max().x, value.origin.x);
    }

    #[test]
    fn plus_and_minus_step_by_one() {
        let (mut s, seen) = tex_pow(5);
        let (minus, _, plus) = s.parts(RECT);
        click(&mut s, plus);
        click(&mut s, minus);
        click(&mut s, minus);
        assert_eq!(*seen.borrow(), vec![6, 5, 4]);
    }

    #[test]
    fn clamped_at_range_ends_without_reporting() {
        let (mut s, seen) = tex_pow(6);
        let (_, value, plus) = s.parts(RECT);
        assert!(click(&mut s, plus).is_consumed());
        assert!(seen.borrow().is_empty());

        // The readout itself is not a button.
        assert!(!click(&mut s, value).is_consumed());
    }

    #[test]
    fn arrows_step_while_hovered() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let (mut s, seen) = tex_pow(3);
        let ev = UiEvent::Key { key: Key::ArrowUp, pointer: Some(Vec2::new(5.0, 5.0)) };
        assert!(s.on_event(&ev, RECT, &ctx).is_consumed());
        assert_eq!(*seen.borrow(), vec![4]);
    }
}
