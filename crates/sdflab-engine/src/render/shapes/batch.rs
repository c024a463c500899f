//! Pipeline and buffer plumbing shared by the overlay renderers.
//!
//! Every overlay shape is an instanced unit square: slot 0 carries the four
//! strip corners, slot 1 one instance per shape. Binding 0 of group 0 is the
//! viewport size used to map logical pixels to NDC.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

const CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
const CORNER_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

/// Smallest instance buffer ever allocated.
const MIN_STREAM_BYTES: u64 = 4096;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

/// Per-instance vertex data. Attribute locations start at 1.
pub(super) trait Instance: Pod {
    const ATTRS: &'static [wgpu::VertexAttribute];

    fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: Self::ATTRS,
        }
    }
}

/// Source-over for premultiplied colors.
fn premultiplied_over() -> wgpu::BlendState {
    let over = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: over, alpha: over }
}

/// Compiled pipeline for one instance type and surface format.
pub(super) struct OverlayPipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport: wgpu::Buffer,
    corners: wgpu::Buffer,
}

impl OverlayPipeline {
    /// `layout` and `resources` describe bindings after the viewport, in the
    /// same order.
    pub(super) fn new<I: Instance>(
        ctx: &RenderCtx<'_>,
        label: &str,
        wgsl: &str,
        layout: &[wgpu::BindGroupLayoutEntry],
        resources: &[wgpu::BindGroupEntry<'_>],
    ) -> Self {
        let device = ctx.device;

        let viewport = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let corners = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let viewport_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let layout_entries: Vec<_> = std::iter::once(viewport_entry).chain(layout.iter().cloned()).collect();
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &layout_entries,
        });

        let entries: Vec<_> = std::iter::once(wgpu::BindGroupEntry { binding: 0, resource: viewport.as_entire_binding() })
            .chain(resources.iter().cloned())
            .collect();
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bind_group_layout,
            entries: &entries,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(wgsl.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });
        let corner_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<[f32; 2]>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &CORNER_ATTRS,
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[corner_layout, I::buffer_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premultiplied_over()),
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
        });

        log::debug!("{label}: pipeline built for {:?}", ctx.surface_format);
        Self { format: ctx.surface_format, pipeline, bind_group, viewport, corners }
    }

    pub(super) fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Draws `count` instances from `instances` over the current frame.
    pub(super) fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        label: &str,
        instances: &wgpu::Buffer,
        count: u32,
    ) {
        let uniform = ViewportUniform {
            size: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            _pad: [0.0; 2],
        };
        ctx.queue.write_buffer(&self.viewport, 0, bytemuck::bytes_of(&uniform));

        let mut pass = target.load_pass(label);
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.corners.slice(..));
        pass.set_vertex_buffer(1, instances.slice(..));
        pass.draw(0..CORNERS.len() as u32, 0..count);
    }
}

fn stream_capacity(len: u64) -> u64 {
    len.next_power_of_two().max(MIN_STREAM_BYTES)
}

/// Instance buffer rewritten every frame. Grows, never shrinks.
pub(super) struct StreamBuffer {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
}

impl StreamBuffer {
    pub(super) const fn new(label: &'static str) -> Self {
        Self { label, buffer: None }
    }

    /// Copies `items` to the GPU, or returns `None` when there is nothing to draw.
    pub(super) fn write<T: Pod>(&mut self, ctx: &RenderCtx<'_>, items: &[T]) -> Option<&wgpu::Buffer> {
        let bytes: &[u8] = bytemuck::cast_slice(items);
        if bytes.is_empty() {
            return None;
        }
        let len = bytes.len() as u64;
        if self.buffer.as_ref().is_none_or(|b| b.size() < len) {
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: stream_capacity(len),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }
        let buffer = self.buffer.as_ref()?;
        ctx.queue.write_buffer(buffer, 0, bytes);
        Some(buffer)
    }
}

/// One shape kind collected and drawn with a single instanced call.
pub(super) struct Batch<I: Instance> {
    label: &'static str,
    wgsl: &'static str,
    pipeline: Option<OverlayPipeline>,
    stream: StreamBuffer,
    items: Vec<I>,
}

impl<I: Instance> Batch<I> {
    pub(super) fn new(label: &'static str, wgsl: &'static str) -> Self {
        Self { label, wgsl, pipeline: None, stream: StreamBuffer::new(label), items: Vec::new() }
    }

    pub(super) fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        items: impl IntoIterator<Item = I>,
    ) {
        self.items.clear();
        self.items.extend(items);
        if self.items.is_empty() {
            return;
        }
        if self.pipeline.as_ref().is_none_or(|p| p.format() != ctx.surface_format) {
            self.pipeline = Some(OverlayPipeline::new::<I>(ctx, self.label, self.wgsl, &[], &[]));
        }

        let count = self.items.len() as u32;
        let (Some(pipeline), Some(buffer)) = (self.pipeline.as_ref(), self.stream.write(ctx, &self.items)) else {
            return;
        };
        pipeline.draw(ctx, target, self.label, buffer, count);
    }
}
