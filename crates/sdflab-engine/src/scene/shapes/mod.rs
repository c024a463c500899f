pub mod circle;
pub mod rounded_rect;
pub mod text;

use crate::paint::Color;

/// Inner stroke: it eats into the fill instead of growing the shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}
