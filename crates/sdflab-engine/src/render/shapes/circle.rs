use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::scene::shapes::circle::CircleCmd;

use super::batch::{Batch, Instance};

/// Draws the circle bucket of a [`DrawList`].
pub struct CircleRenderer {
    batch: Batch<CircleInstance>,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self { batch: Batch::new("sdflab circle", include_str!("shaders/circle.wgsl")) }
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        self.batch.draw(ctx, target, draw_list.circles().iter().filter_map(CircleInstance::from_cmd));
    }
}

// Locations 1..=4; `radius_border` is (radius, ring width).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_border: [f32; 2],
    color: [f32; 4],
    border_color: [f32; 4],
}

impl Instance for CircleInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4,
        4 => Float32x4
    ];
}

impl CircleInstance {
    /// `None` for circles with nothing to draw.
    fn from_cmd(cmd: &CircleCmd) -> Option<Self> {
        let finite = cmd.radius.is_finite() && cmd.center.x.is_finite() && cmd.center.y.is_finite();
        if !finite || cmd.radius <= 0.0 {
            return None;
        }
        let (ring, border_color) = cmd
            .border
            .map_or((0.0, [0.0; 4]), |b| (b.width.clamp(0.0, cmd.radius), b.color.to_array()));
        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius_border: [cmd.radius, ring],
            color: cmd.color.to_array(),
            border_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::Border;

    use super::*;

    fn cmd(radius: f32, border: Option<Border>) -> CircleCmd {
        CircleCmd { center: Vec2::new(10.0, 20.0), radius, color: Color::WHITE, border }
    }

    #[test]
    fn attribute_offsets_follow_the_struct() {
        assert_eq!(size_of::<CircleInstance>(), 48);
        let offsets: Vec<u64> = CircleInstance::ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 8, 16, 32]);
    }

    #[test]
    fn degenerate_circles_are_skipped() {
        assert!(CircleInstance::from_cmd(&cmd(0.0, None)).is_none());
        assert!(CircleInstance::from_cmd(&cmd(-3.0, None)).is_none());
        assert!(CircleInstance::from_cmd(&cmd(f32::NAN, None)).is_none());
    }

    #[test]
    fn ring_never_exceeds_the_radius() {
        let inst = CircleInstance::from_cmd(&cmd(4.0, Some(Border::new(9.0, Color::BLACK)))).unwrap();
        assert_eq!(inst.radius_border, [4.0, 4.0]);
        assert_eq!(inst.center, [10.0, 20.0]);
    }
}
