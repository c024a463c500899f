use crate::coords::{CornerRadii, Rect};
use crate::paint::Color;
use crate::scene::DrawList;

use super::Border;

/// Rectangle with per-corner radii. Zero radii give a plain rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub color: Color,
    pub border: Option<Border>,
}

impl DrawList {
    pub fn push_rounded_rect(&mut self, rect: Rect, radii: CornerRadii, color: Color, border: Option<Border>) {
        self.rounded_rects.push(RoundedRectCmd { rect, radii, color, border });
    }

    pub fn push_solid_rect(&mut self, rect: Rect, color: Color) {
        self.push_rounded_rect(rect, CornerRadii::zero(), color, None);
    }
}
