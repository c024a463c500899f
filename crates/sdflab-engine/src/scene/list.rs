use super::shapes::circle::CircleCmd;
use super::shapes::rounded_rect::RoundedRectCmd;
use super::shapes::text::TextCmd;

/// Overlay geometry for one frame, bucketed by shape kind.
///
/// Buckets are drawn whole, one renderer each: rectangles, then circles, then
/// text. Inside a bucket later commands land on top.
#[derive(Debug, Default)]
pub struct DrawList {
    pub(crate) rounded_rects: Vec<RoundedRectCmd>,
    pub(crate) circles: Vec<CircleCmd>,
    pub(crate) texts: Vec<TextCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties every bucket, keeping capacity.
    pub fn clear(&mut self) {
        self.rounded_rects.clear();
        self.circles.clear();
        self.texts.clear();
    }

    pub fn len(&self) -> usize {
        self.rounded_rects.len() + self.circles.len() + self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rounded_rects(&self) -> &[RoundedRectCmd] {
        &self.rounded_rects
    }

    pub fn circles(&self) -> &[CircleCmd] {
        &self.circles
    }

    pub fn texts(&self) -> &[TextCmd] {
        &self.texts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Rect, Vec2};
    use crate::paint::Color;

    fn unit() -> Rect {
        Rect::new(0.0, 0.0, 1.0, 1.0)
    }

    #[test]
    fn commands_land_in_their_bucket_in_order() {
        let mut list = DrawList::new();
        list.push_solid_rect(unit(), Color::WHITE);
        list.push_circle(Vec2::new(0.0, 0.0), 1.0, Color::WHITE, None);
        list.push_solid_rect(unit(), Color::BLACK);

        assert_eq!(list.len(), 3);
        assert_eq!(list.circles().len(), 1);
        let colors: Vec<Color> = list.rounded_rects().iter().map(|c| c.color).collect();
        assert_eq!(colors, vec![Color::WHITE, Color::BLACK]);
    }

    #[test]
    fn clear_empties_every_bucket() {
        let mut list = DrawList::new();
        list.push_solid_rect(unit(), Color::WHITE);
        list.push_circle(Vec2::new(2.0, 2.0), 1.0, Color::BLACK, None);
        list.clear();
        assert!(list.is_empty());
        assert!(list.rounded_rects().is_empty() && list.circles().is_empty());
    }

    #[test]
    fn solid_rect_has_square_corners() {
        let mut list = DrawList::new();
        list.push_solid_rect(Rect::new(1.0, 2.0, 3.0, 4.0), Color::WHITE);
        let cmd = &list.rounded_rects()[0];
        assert_eq!(cmd.radii, CornerRadii::zero());
        assert!(cmd.border.is_none());
    }
}
