//! GPU side of the distance-field scene: one `R8Snorm` texture, two samplers,
//! a shading uniform and a 4-vertex strip covering the viewport.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use sdflab_engine::render::{RenderCtx, RenderTarget};

use crate::scene::{FilterMode, SdfScene, ShadingMode};
use crate::shader::{self, FRAGMENT_ENTRY, SDF_WGSL, ShaderError, VERTEX_ENTRY};

const LABEL: &str = "sdflab field";

/// Corners of the unit quad in strip order.
const QUAD_STRIP: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ShadingUniform {
    use_banded: f32,
    _pad: [f32; 3],
}

impl ShadingUniform {
    fn new(mode: ShadingMode) -> Self {
        let use_banded = match mode {
            ShadingMode::Banded => 1.0,
            ShadingMode::Raw => 0.0,
        };
        Self { use_banded, _pad: [0.0; 3] }
    }
}

const SHADING_UNIFORM_SIZE: NonZeroU64 = match NonZeroU64::new(size_of::<ShadingUniform>() as u64) {
    Some(n) => n,
    None => panic!("ShadingUniform must not be zero-sized"),
};

/// Field texture plus the two bind groups that sample it.
struct FieldTexture {
    size: u32,
    texture: wgpu::Texture,
    linear: wgpu::BindGroup,
    nearest: wgpu::BindGroup,
}

pub struct SdfRenderer {
    format: wgpu::TextureFormat,
    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline: wgpu::RenderPipeline,
    linear_sampler: wgpu::Sampler,
    nearest_sampler: wgpu::Sampler,
    uniform: wgpu::Buffer,
    quad: wgpu::Buffer,
    texture: Option<FieldTexture>,
    /// Scene generation the texture holds.
    uploaded: Option<u64>,
}

impl SdfRenderer {
    /// Validates the bundled shader, links it against the pipeline layout and
    /// creates every GPU object except the texture, which follows the scene's
    /// size on first render.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self, ShaderError> {
        Self::with_source(device, format, SDF_WGSL)
    }

    fn with_source(device: &wgpu::Device, format: wgpu::TextureFormat, source: &str) -> Result<Self, ShaderError> {
        shader::validate_wgsl(LABEL, source)?;

        let (shader, bind_group_layout, pipeline) = shader::link_checked(device, LABEL, || {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(LABEL),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
            let bind_group_layout = create_bind_group_layout(device);
            let pipeline = create_pipeline(device, format, &shader, &bind_group_layout);
            (shader, bind_group_layout, pipeline)
        })?;

        let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(LABEL),
            contents: bytemuck::bytes_of(&ShadingUniform::new(ShadingMode::Banded)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(LABEL),
            contents: bytemuck::cast_slice(&QUAD_STRIP),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::info!("field pipeline ready for {format:?}");

        Ok(Self {
            format,
            shader,
            bind_group_layout,
            pipeline,
            linear_sampler: create_sampler(device, wgpu::FilterMode::Linear),
            nearest_sampler: create_sampler(device, wgpu::FilterMode::Nearest),
            uniform,
            quad,
            texture: None,
            uploaded: None,
        })
    }

    /// Rebuilds the pipeline when the surface format changed.
    pub fn ensure_format(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<(), ShaderError> {
        if format == self.format {
            return Ok(());
        }
        self.pipeline = shader::link_checked(device, LABEL, || {
            create_pipeline(device, format, &self.shader, &self.bind_group_layout)
        })?;
        self.format = format;
        log::debug!("field pipeline rebuilt for {format:?}");
        Ok(())
    }

    /// Brings the texture and uniform up to date with `scene`, then draws the
    /// full-screen quad over the current frame contents.
    ///
    /// Expects [`ensure_format`](Self::ensure_format) to have run for this frame.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &SdfScene) {
        self.sync_texture(ctx, scene);
        ctx.queue.write_buffer(&self.uniform, 0, bytemuck::bytes_of(&ShadingUniform::new(scene.shading())));

        let Some(texture) = self.texture.as_ref() else { return };
        let bind_group = match scene.filter() {
            FilterMode::Bilinear => &texture.linear,
            FilterMode::Nearest => &texture.nearest,
        };

        let mut rpass = target.load_pass(LABEL);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad.slice(..));
        rpass.draw(0..QUAD_STRIP.len() as u32, 0..1);
    }

    /// Reallocates when the side length changed and uploads when the scene
    /// regenerated since the last upload.
    fn sync_texture(&mut self, ctx: &RenderCtx<'_>, scene: &SdfScene) {
        let field = scene.field();
        let size = field.size();

        if self.texture.as_ref().is_none_or(|t| t.size != size) {
            self.texture = Some(self.create_texture(ctx.device, size));
            self.uploaded = None;
        }
        if self.uploaded == Some(scene.generation()) {
            return;
        }
        let Some(texture) = self.texture.as_ref() else { return };

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            field.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(size),
                rows_per_image: Some(size),
            },
            wgpu::Extent3d { width: size, height: size, depth_or_array_layers: 1 },
        );
        self.uploaded = Some(scene.generation());
    }

    fn create_texture(&self, device: &wgpu::Device, size: u32) -> FieldTexture {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(LABEL),
            size: wgpu::Extent3d { width: size, height: size, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Snorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind = |sampler: &wgpu::Sampler| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(LABEL),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&view) },
                    wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(sampler) },
                    wgpu::BindGroupEntry { binding: 2, resource: self.uniform.as_entire_binding() },
                ],
            })
        };
        let linear = bind(&self.linear_sampler);
        let nearest = bind(&self.nearest_sampler);

        log::debug!("field texture {size}×{size}");
        FieldTexture { size, texture, linear, nearest }
    }
}

fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(LABEL),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(SHADING_UNIFORM_SIZE),
                },
                count: None,
            },
        ],
    })
}

fn create_sampler(device: &wgpu::Device, filter: wgpu::FilterMode) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(LABEL),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    shader: &wgpu::ShaderModule,
    bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(LABEL),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(LABEL),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &ATTRS,
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shading_uniform_is_one_vec4() {
        assert_eq!(size_of::<ShadingUniform>(), 16);
        assert_eq!(ShadingUniform::new(ShadingMode::Banded).use_banded, 1.0);
        assert_eq!(ShadingUniform::new(ShadingMode::Raw).use_banded, 0.0);
    }

    #[test]
    fn strip_covers_the_unit_square() {
        // Triangles (0, 1, 2) and (1, 2, 3) of the strip.
        assert_eq!(QUAD_STRIP[0], [0.0, 0.0]);
        assert_eq!(QUAD_STRIP[3], [1.0, 1.0]);
        assert_eq!(QUAD_STRIP[1][1], QUAD_STRIP[0][1]);
        assert_eq!(QUAD_STRIP[2][0], QUAD_STRIP[0][0]);
    }

    // ── pipeline linking ──

    /// A device without a surface, or `None` on machines with no adapter.
    fn headless_device() -> Option<wgpu::Device> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default())).ok()?;
        let (device, _queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default())).ok()?;
        Some(device)
    }

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

    #[test]
    fn bundled_shader_links() {
        let Some(device) = headless_device() else { return };
        let renderer = SdfRenderer::new(&device, FORMAT);
        assert!(renderer.is_ok(), "{:?}", renderer.err());
    }

    #[test]
    fn layout_mismatch_is_a_link_error() {
        // Valid on its own, but binding 2 no longer matches the uniform slot.
        let source = SDF_WGSL.replace("var<uniform> params", "var<storage, read> params");
        assert!(shader::validate_wgsl(LABEL, &source).is_ok());

        let Some(device) = headless_device() else { return };
        match SdfRenderer::with_source(&device, FORMAT, &source) {
            Err(ShaderError::Link { label, .. }) => assert_eq!(label, LABEL),
            Err(other) => panic!("expected link error, got {other}"),
            Ok(_) => panic!("mismatched layout linked"),
        }
    }

    #[test]
    fn vertex_format_mismatch_is_a_link_error() {
        let source = SDF_WGSL.replace("@location(0) corner: vec2<f32>", "@location(0) corner: vec2<i32>");
        let source = source.replace("(corner - vec2<f32>(0.5))", "(vec2<f32>(corner) - vec2<f32>(0.5))");
        let source = source.replace("vec2<f32>(corner.x, 1.0 - corner.y)", "vec2<f32>(f32(corner.x), 1.0 - f32(corner.y))");
        assert!(shader::validate_wgsl(LABEL, &source).is_ok());

        let Some(device) = headless_device() else { return };
        assert!(matches!(
            SdfRenderer::with_source(&device, FORMAT, &source),
            Err(ShaderError::Link { .. })
        ));
    }

    #[test]
    fn format_change_relinks() {
        let Some(device) = headless_device() else { return };
        let Ok(mut renderer) = SdfRenderer::new(&device, FORMAT) else {
            panic!("bundled shader failed to link");
        };
        assert!(renderer.ensure_format(&device, wgpu::TextureFormat::Rgba8Unorm).is_ok());
        assert_eq!(renderer.format, wgpu::TextureFormat::Rgba8Unorm);
    }
}
