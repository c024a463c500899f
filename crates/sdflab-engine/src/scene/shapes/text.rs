use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::DrawList;
use crate::text::FontId;

/// One string laid out from `origin`, all units logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
    /// Top-left of the first line.
    pub origin: Vec2,
    /// Wraps at this width when set.
    pub max_width: Option<f32>,
}

impl DrawList {
    pub fn push_text(&mut self, cmd: TextCmd) {
        self.texts.push(cmd);
    }
}
