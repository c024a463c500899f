use sdflab_engine::coords::{Rect, Vec2};
use sdflab_engine::input::Key;
use sdflab_engine::paint::Color;
use sdflab_engine::scene::Border;
use sdflab_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// Boolean toggle with a text label.
///
/// Toggles on click, or on Space / Enter while hovered.
pub struct Checkbox {
    checked: bool,
    label: String,
    font: Option<FontId>,
    font_size: f32,
    label_color: Color,
    box_size: f32,
    bg: Color,
    checked_color: Color,
    border_color: Color,
    gap: f32,
    on_change: Option<Box<dyn FnMut(bool)>>,
}

impl Checkbox {
    pub fn new() -> Self {
        Self {
            checked: false,
            label: String::new(),
            font: None,
            font_size: 12.0,
            label_color: Color::from_straight(0.9, 0.9, 0.92, 1.0),
            box_size: 12.0,
            bg: Color::from_straight(0.12, 0.13, 0.16, 1.0),
            checked_color: Color::from_straight(0.2, 0.65, 1.0, 1.0),
            border_color: Color::from_straight(0.45, 0.5, 0.6, 1.0),
            gap: 6.0,
            on_change: None,
        }
    }

    pub fn checked(mut self, v: bool) -> Self {
        self.checked = v;
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

    pub fn font_size(mut self, v: f32) -> Self {
        self.font_size = v;
        self
    }

    pub fn checked_color(mut self, v: Color) -> Self {
        self.checked_color = v;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    fn toggle(&mut self) -> EventResult {
        self.checked = !self.checked;
        if let Some(f) = &mut self.on_change {
            f(self.checked);
        }
        EventResult::Consumed
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Checkbox {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let text = match self.font {
            Some(f) if !self.label.is_empty() => ctx.measure_text(&self.label, f, self.font_size, None),
            _ => Vec2::zero(),
        };
        let w = if text.x > 0.0 { self.box_size + self.gap + text.x } else { self.box_size };
        constraints.fit(Vec2::new(w, self.box_size.max(text.y)))
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        let hovered = painter.is_hovered(rect);
        let box_rect = Rect::new(
            rect.origin.x,
            rect.origin.y + (rect.size.y - self.box_size) * 0.5,
            self.box_size,
            self.box_size,
        );

        let bg = match (self.checked, hovered) {
            (true, true) => self.checked_color.lighten(0.1),
            (true, false) => self.checked_color,
            (false, _) => self.bg,
        };
        let border = if hovered { self.border_color.lighten(0.2) } else { self.border_color };
        painter.fill_rounded_rect(box_rect, 2.0, bg, Some(Border::new(1.0, border)));

        if self.checked {
            let m = self.box_size * 0.3;
            let mark = Rect::new(
                box_rect.origin.x + m,
                box_rect.origin.y + m,
                self.box_size - 2.0 * m,
                self.box_size - 2.0 * m,
            );
            painter.fill_rect(mark, Color::WHITE);
        }

        if let Some(font) = self.font.filter(|_| !self.label.is_empty()) {
            let x = rect.origin.x + self.box_size + self.gap;
            let y = rect.origin.y + (rect.size.y - self.font_size * 1.2) * 0.5;
            let max_w = (rect.size.x - self.box_size - self.gap).max(0.0);
            painter.text(self.label.as_str(), font, self.font_size, self.label_color, Vec2::new(x, y), Some(max_w));
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        match event {
            UiEvent::Click { pos } if rect.contains(*pos) => self.toggle(),
            UiEvent::Key { key: Key::Space | Key::Enter, pointer: Some(p), .. } if rect.contains(*p) => {
                self.toggle()
            }
            _ => EventResult::Ignored,
        }
    }
}
