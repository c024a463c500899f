use sdflab_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, Insets, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Stacks children top to bottom, each as wide as the column's content box.
#[derive(Default)]
pub struct Column {
    items: Vec<Element>,
    gap: f32,
    padding: Insets,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertical gap between consecutive children.
    pub fn spacing(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.items.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = impl Into<Element>>) -> Self {
        self.items.extend(children.into_iter().map(Into::into));
        self
    }

    fn item_bounds(width: f32) -> Constraints {
        // Stretch only when the width is bounded.
        let min_w = if width.is_finite() { width } else { 0.0 };
        Constraints { min: Vec2::new(min_w, 0.0), max: Vec2::new(width, f32::INFINITY) }
    }

    /// Rect of every child when the column occupies `rect`.
    fn place(&self, rect: Rect, ctx: &LayoutCtx<'_>) -> Vec<Rect> {
        let inner = self.padding.deflate_rect(rect);
        let bounds = Self::item_bounds(inner.size.x);
        let mut cursor = inner.origin.y;
        let mut rects = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let size = item.measure(bounds, ctx);
            rects.push(Rect::new(inner.origin.x, cursor, size.x, size.y));
            cursor += size.y + self.gap;
        }
        rects
    }
}

impl Widget for Column {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        let bounds = Self::item_bounds((constraints.max.x - self.padding.horizontal()).max(0.0));
        let sizes: Vec<Vec2> = self.items.iter().map(|item| item.measure(bounds, ctx)).collect();

        let gaps = self.gap * sizes.len().saturating_sub(1) as f32;
        let content_h = sizes.iter().map(|s| s.y).sum::<f32>() + gaps;
        let content_w = sizes.iter().fold(0.0f32, |w, s| w.max(s.x));

        let width = if constraints.max.x.is_finite() {
            constraints.max.x
        } else {
            content_w + self.padding.horizontal()
        };
        constraints.fit(Vec2::new(width, content_h + self.padding.vertical()))
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        let rects = self.place(rect, &painter.layout_ctx());
        for (item, r) in self.items.iter().zip(rects) {
            item.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let rects = self.place(rect, ctx);
        let consumed = self
            .items
            .iter_mut()
            .zip(rects)
            .any(|(item, r)| item.on_event(event, r, ctx).is_consumed());
        if consumed { EventResult::Consumed } else { EventResult::Ignored }
    }
}
