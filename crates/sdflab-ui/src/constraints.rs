//! Measure-pass inputs: size bounds, padding insets and the shared text
//! measuring context.

use sdflab_engine::coords::{Rect, Vec2};
use sdflab_engine::text::{FontId, FontSystem};

/// Padding on each side of a box, in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub const fn uniform(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    /// `vertical` above and below, `horizontal` left and right.
    pub const fn axes(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    #[inline]
    pub fn horizontal(self) -> f32 {
        self.left + self.right
    }

    #[inline]
    pub fn vertical(self) -> f32 {
        self.top + self.bottom
    }

    /// Grows `inner` by the insets.
    #[inline]
    pub fn inflate_size(self, inner: Vec2) -> Vec2 {
        Vec2::new(inner.x + self.horizontal(), inner.y + self.vertical())
    }

    /// The part of `rect` left after removing the insets; never negative.
    pub fn deflate_rect(self, rect: Rect) -> Rect {
        Rect::new(
            rect.origin.x + self.left,
            rect.origin.y + self.top,
            (rect.size.x - self.horizontal()).max(0.0),
            (rect.size.y - self.vertical()).max(0.0),
        )
    }
}

/// Size bounds a parent hands to a child while measuring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    /// Any size from zero up to `max`.
    pub fn up_to(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    /// Exactly `width` wide, height bounded as in `self`.
    pub fn with_width(self, width: f32) -> Self {
        let w = width.min(self.max.x);
        Self { min: Vec2::new(w, self.min.y), max: Vec2::new(w, self.max.y) }
    }

    /// `size` clamped into the bounds.
    #[must_use]
    pub fn fit(self, size: Vec2) -> Vec2 {
        Vec2::new(size.x.clamp(self.min.x, self.max.x), size.y.clamp(self.min.y, self.max.y))
    }

    /// Bounds for content inside `insets`; the minimum is dropped.
    #[must_use]
    pub fn deflate(self, insets: Insets) -> Self {
        Self::up_to(Vec2::new(
            (self.max.x - insets.horizontal()).max(0.0),
            (self.max.y - insets.vertical()).max(0.0),
        ))
    }
}

/// What widgets may consult while measuring or routing events.
#[derive(Clone, Copy)]
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
    /// Physical pixels per logical pixel, the same factor the text renderer
    /// rasterizes with.
    pub scale: f32,
}

impl LayoutCtx<'_> {
    pub fn measure_text(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.fonts.measure(text, font, size, max_width, self.scale)
    }
}
