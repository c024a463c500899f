use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::DrawList;

use super::Border;

/// Filled disc, optionally ringed.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub border: Option<Border>,
}

impl DrawList {
    pub fn push_circle(&mut self, center: Vec2, radius: f32, color: Color, border: Option<Border>) {
        self.circles.push(CircleCmd { center, radius, color, border });
    }
}
