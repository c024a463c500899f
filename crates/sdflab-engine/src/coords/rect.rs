use super::Vec2;

/// Axis-aligned box in logical pixels, `origin` at the top-left corner.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    /// Bottom-right corner.
    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// No area to draw.
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    /// Whether `p` lies in `[origin, max)` on both axes.
    pub fn contains(self, p: Vec2) -> bool {
        let end = self.max();
        (self.origin.x..end.x).contains(&p.x) && (self.origin.y..end.y).contains(&p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_and_bottom_edges_are_outside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::zero()));
        assert!(rect.contains(Vec2::new(5.0, 9.9)));
        assert!(!rect.contains(Vec2::new(10.0, 5.0)));
        assert!(!rect.contains(Vec2::new(5.0, 10.0)));
        assert!(!rect.contains(Vec2::new(-1.0, 5.0)));
    }

    #[test]
    fn degenerate_rects_are_empty_and_contain_nothing() {
        let flat = Rect::new(3.0, 3.0, 10.0, 0.0);
        assert!(flat.is_empty());
        assert!(!flat.contains(Vec2::new(4.0, 3.0)));
        assert!(Rect::new(0.0, 0.0, -2.0, 4.0).is_empty());
        assert!(Rect::new(0.0, 0.0, f32::NAN, 4.0).is_empty());
    }

    #[test]
    fn center_and_far_corner() {
        let rect = Rect::new(2.0, 4.0, 6.0, 8.0);
        assert_eq!(rect.center(), Vec2::new(5.0, 8.0));
        assert_eq!(rect.max(), Vec2::new(8.0, 12.0));
    }
}
