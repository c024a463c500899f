/// Per-corner rounding in logical pixels, clockwise from top-left.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub const fn all(r: f32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    /// Square corners.
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    /// Shader layout, negative radii treated as square.
    pub(crate) fn to_array(self) -> [f32; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left].map(|r| r.max(0.0))
    }
}
