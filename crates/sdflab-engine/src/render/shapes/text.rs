use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::text::FontSystem;

use super::atlas::GlyphAtlas;
use super::batch::{Instance, OverlayPipeline, StreamBuffer};

const LABEL: &str = "sdflab text";
const ATLAS_SIDE: u32 = 2048;

struct TextGpu {
    atlas: GlyphAtlas,
    pipeline: OverlayPipeline,
}

impl TextGpu {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let atlas = GlyphAtlas::new(ctx.device, ATLAS_SIDE);
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(LABEL),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let layout = [
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ];
        let resources = [
            wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(atlas.view()) },
            wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
        ];
        let pipeline =
            OverlayPipeline::new::<GlyphInstance>(ctx, LABEL, include_str!("shaders/text.wgsl"), &layout, &resources);

        Self { atlas, pipeline }
    }
}

/// Draws the text bucket of a [`DrawList`].
///
/// Strings are laid out by fontdue at physical pixel size, so glyphs stay
/// crisp at any scale factor. Each glyph is rasterized once per font and
/// size into an R8 atlas that lives as long as the surface format does.
pub struct TextRenderer {
    gpu: Option<TextGpu>,
    stream: StreamBuffer,
    glyphs: Vec<GlyphInstance>,
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            gpu: None,
            stream: StreamBuffer::new(LABEL),
            glyphs: Vec::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
        fonts: &FontSystem,
    ) {
        if draw_list.texts().is_empty() {
            return;
        }
        if self.gpu.as_ref().is_none_or(|g| g.pipeline.format() != ctx.surface_format) {
            self.gpu = Some(TextGpu::new(ctx));
        }
        let Some(gpu) = self.gpu.as_mut() else { return };

        let scale = ctx.scale_factor.max(0.01);
        self.glyphs.clear();
        for cmd in draw_list.texts() {
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("no font {:?}, text skipped", cmd.font);
                continue;
            };

            self.layout.reset(&LayoutSettings {
                x: cmd.origin.x * scale,
                y: cmd.origin.y * scale,
                max_width: cmd.max_width.map(|w| w * scale),
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

            let color = cmd.color.to_array();
            for g in self.layout.glyphs() {
                if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                    continue;
                }
                let Some(uv) = gpu.atlas.glyph(ctx.queue, font, g.key) else { continue };
                self.glyphs.push(GlyphInstance {
                    dst_min: [g.x / scale, g.y / scale],
                    dst_max: [(g.x + g.width as f32) / scale, (g.y + g.height as f32) / scale],
                    uv_min: uv.min,
                    uv_max: uv.max,
                    color,
                });
            }
        }

        let count = self.glyphs.len() as u32;
        if let Some(buffer) = self.stream.write(ctx, &self.glyphs) {
            gpu.pipeline.draw(ctx, target, LABEL, buffer, count);
        }
    }
}

// Locations 1..=5, destination box in logical pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl Instance for GlyphInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];
}
