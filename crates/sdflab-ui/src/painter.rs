use sdflab_engine::coords::{CornerRadii, Rect, Vec2};
use sdflab_engine::paint::Color;
use sdflab_engine::scene::shapes::text::TextCmd;
use sdflab_engine::scene::{Border, DrawList};
use sdflab_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;

/// What a widget paints through.
///
/// Records into the frame's [`DrawList`] and knows where the pointer is, so
/// hover visuals need no state of their own.
pub struct Painter<'a> {
    list: &'a mut DrawList,
    fonts: &'a FontSystem,
    pointer: Option<Vec2>,
    scale: f32,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(list: &'a mut DrawList, fonts: &'a FontSystem, pointer: Option<Vec2>, scale: f32) -> Self {
        Self { list, fonts, pointer, scale }
    }

    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.pointer.is_some_and(|p| rect.contains(p))
    }

    /// Text extent in logical pixels, measured at the frame's physical scale.
    pub fn measure_text(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.layout_ctx().measure_text(text, font, size, max_width)
    }

    /// Measuring context for containers that lay children out again while painting.
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.fonts, scale: self.scale }
    }

    // ── shapes ────────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.list.push_solid_rect(rect, color);
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, border: Option<Border>) {
        self.list.push_rounded_rect(rect, CornerRadii::all(radius), color, border);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, border: Option<Border>) {
        self.list.push_circle(center, radius, color, border);
    }

    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        self.list.push_text(TextCmd { text: text.into(), font, size, color, origin, max_width });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_are_recorded() {
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let mut p = Painter::new(&mut list, &fonts, None, 1.0);
        p.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        p.fill_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 3.0, Color::WHITE, None);
        p.fill_circle(Vec2::new(5.0, 5.0), 2.0, Color::BLACK, None);

        assert_eq!(list.rounded_rects().len(), 2);
        assert_eq!(list.rounded_rects()[1].radii, CornerRadii::all(3.0));
        assert_eq!(list.circles().len(), 1);
    }

    #[test]
    fn hover_needs_a_pointer() {
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);

        assert!(!Painter::new(&mut list, &fonts, None, 1.0).is_hovered(r));
        assert!(Painter::new(&mut list, &fonts, Some(Vec2::new(5.0, 5.0)), 1.0).is_hovered(r));
        assert!(!Painter::new(&mut list, &fonts, Some(Vec2::new(10.0, 5.0)), 1.0).is_hovered(r));
    }
}
