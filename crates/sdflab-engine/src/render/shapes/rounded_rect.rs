use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::scene::shapes::rounded_rect::RoundedRectCmd;

use super::batch::{Batch, Instance};

/// Draws the rounded-rect bucket of a [`DrawList`], plain rectangles included.
///
/// The fragment shader evaluates a rounded-box distance per pixel for a
/// one-pixel antialiased edge; a border is a ring inside the outer edge.
pub struct RoundedRectRenderer {
    batch: Batch<RectInstance>,
}

impl Default for RoundedRectRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundedRectRenderer {
    pub fn new() -> Self {
        Self { batch: Batch::new("sdflab rounded rect", include_str!("shaders/rounded_rect.wgsl")) }
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        self.batch.draw(ctx, target, draw_list.rounded_rects().iter().filter_map(RectInstance::from_cmd));
    }
}

// Locations 1..=6; radii run tl, tr, br, bl and `border_width_pad.x` is the
// ring width.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    radii: [f32; 4],
    color: [f32; 4],
    border_color: [f32; 4],
    border_width_pad: [f32; 2],
}

impl Instance for RectInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x2
    ];
}

impl RectInstance {
    fn from_cmd(cmd: &RoundedRectCmd) -> Option<Self> {
        let r = cmd.rect;
        if r.is_empty() {
            return None;
        }
        let (width, border_color) = cmd.border.map_or((0.0, [0.0; 4]), |b| (b.width.max(0.0), b.color.to_array()));
        Some(Self {
            origin: [r.origin.x, r.origin.y],
            size: [r.size.x, r.size.y],
            radii: cmd.radii.to_array(),
            color: cmd.color.to_array(),
            border_color,
            border_width_pad: [width, 0.0],
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::{CornerRadii, Rect};
    use crate::paint::Color;
    use crate::scene::Border;

    use super::*;

    #[test]
    fn attribute_offsets_follow_the_struct() {
        assert_eq!(size_of::<RectInstance>(), 72);
        let offsets: Vec<u64> = RectInstance::ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 8, 16, 32, 48, 64]);
    }

    #[test]
    fn empty_rects_are_skipped() {
        let cmd = RoundedRectCmd {
            rect: Rect::new(0.0, 0.0, 0.0, 10.0),
            radii: CornerRadii::zero(),
            color: Color::WHITE,
            border: None,
        };
        assert!(RectInstance::from_cmd(&cmd).is_none());
    }

    #[test]
    fn negative_border_and_radii_clamp_to_zero() {
        let cmd = RoundedRectCmd {
            rect: Rect::new(1.0, 2.0, 30.0, 40.0),
            radii: CornerRadii { top_left: -2.0, ..CornerRadii::all(5.0) },
            color: Color::WHITE,
            border: Some(Border::new(-1.0, Color::BLACK)),
        };
        let inst = RectInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.radii, [0.0, 5.0, 5.0, 5.0]);
        assert_eq!(inst.border_width_pad, [0.0, 0.0]);
        assert_eq!(inst.size, [30.0, 40.0]);
    }
}
