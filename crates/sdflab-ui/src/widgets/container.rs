use sdflab_engine::coords::{Rect, Vec2};
use sdflab_engine::paint::Color;
use sdflab_engine::scene::Border;

use crate::constraints::{Constraints, Insets, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

#[derive(Debug, Clone, Copy, Default)]
struct Decoration {
    fill: Option<Color>,
    outline: Option<Border>,
    radius: f32,
}

impl Decoration {
    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        if self.fill.is_none() && self.outline.is_none() {
            return;
        }
        painter.fill_rounded_rect(rect, self.radius, self.fill.unwrap_or(Color::TRANSPARENT), self.outline);
    }
}

/// Pads a single child and optionally draws a rounded box behind it.
#[derive(Default)]
pub struct Container {
    content: Option<Element>,
    padding: Insets,
    decoration: Decoration,
    width: Option<f32>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.content = Some(child.into());
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn background(mut self, fill: Color) -> Self {
        self.decoration.fill = Some(fill);
        self
    }

    pub fn border(mut self, outline: Border) -> Self {
        self.decoration.outline = Some(outline);
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.decoration.radius = radius;
        self
    }

    /// Pins the outer width, capped by what the parent offers.
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

impl Widget for Container {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let bounds = match self.width {
            Some(w) => constraints.with_width(w),
            None => constraints,
        };
        let content = self
            .content
            .as_ref()
            .map_or(Vec2::zero(), |c| c.measure(bounds.deflate(self.padding), ctx));
        bounds.fit(self.padding.inflate_size(content))
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        self.decoration.paint(painter, rect);
        if let Some(content) = &self.content {
            content.paint(painter, self.padding.deflate_rect(rect));
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let inner = self.padding.deflate_rect(rect);
        self.content
            .as_mut()
            .map_or(EventResult::Ignored, |c| c.on_event(event, inner, ctx))
    }
}
