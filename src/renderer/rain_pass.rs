//! The single instanced draw that renders every glyph.
//!
//! Bind group layout:
//! - group(0): rain uniform + strip storage buffer
//! - group(1): atlas texture + sampler
//!
//! Vertex buffers: the shared quad (per vertex) and one `u32` glyph code
//! per instance.

use wgpu::util::DeviceExt;

use super::{
    frame::{FrameData, QuadVertex, StripInstance, QUAD_INDICES, QUAD_VERTICES},
    pipeline_util,
};
use crate::{
    error::GlyphfallError,
    gpu::{
        dynamic_buffer::GrowableBuffer, pipeline_helpers,
        render_context::RenderContext, shader_composer::ShaderComposer,
    },
};

const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];
const GLYPH_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![2 => Uint32];

/// Pipeline, buffers, and bind group for the rain draw.
pub struct RainPass {
    pipeline: wgpu::RenderPipeline,
    quad_vertices: wgpu::Buffer,
    quad_indices: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    strip_buffer: GrowableBuffer<StripInstance>,
    glyph_buffer: GrowableBuffer<u32>,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    instance_count: u32,
}

impl RainPass {
    /// Build the pipeline and allocate buffers sized for `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphfallError::Shader`] with the compiler diagnostic if
    /// the shader fails to compose or the pipeline fails validation.
    pub async fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        atlas_layout: &wgpu::BindGroupLayout,
        frame: &FrameData,
    ) -> Result<Self, GlyphfallError> {
        let device = &context.device;

        let quad_vertices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Glyph Quad Vertices"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let quad_indices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Glyph Quad Indices"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            });
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Rain Uniform"),
                contents: bytemuck::bytes_of(&frame.uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let strip_buffer = GrowableBuffer::new_with_data(
            device,
            "Strip Instances",
            &frame.strips,
            wgpu::BufferUsages::STORAGE,
        );
        let glyph_buffer = GrowableBuffer::new_with_data(
            device,
            "Glyph Codes",
            &frame.glyphs,
            wgpu::BufferUsages::VERTEX,
        );

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Rain Layout"),
                entries: &[
                    pipeline_helpers::vertex_uniform_buffer(0),
                    pipeline_helpers::vertex_storage_buffer(1),
                ],
            });
        let bind_group = Self::create_bind_group(
            device,
            &bind_group_layout,
            &uniform_buffer,
            &strip_buffer,
        );

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = composer
            .compose(
                device,
                "Rain Shader",
                include_str!("../../assets/shaders/raster/rain.wgsl"),
                "raster/rain.wgsl",
            )
            .map(|shader| {
                Self::create_pipeline(
                    context,
                    &shader,
                    &bind_group_layout,
                    atlas_layout,
                )
            });
        if let Some(err) = device.pop_error_scope().await {
            return Err(GlyphfallError::Shader(err.to_string()));
        }
        let pipeline = pipeline?;

        Ok(Self {
            pipeline,
            quad_vertices,
            quad_indices,
            uniform_buffer,
            strip_buffer,
            glyph_buffer,
            bind_group_layout,
            bind_group,
            instance_count: frame.instance_count(),
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        strip_buffer: &GrowableBuffer<StripInstance>,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Rain Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: strip_buffer.buffer().as_entire_binding(),
                },
            ],
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        shader: &wgpu::ShaderModule,
        bind_group_layout: &wgpu::BindGroupLayout,
        atlas_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Rain Pipeline Layout"),
                bind_group_layouts: &[bind_group_layout, atlas_layout],
                push_constant_ranges: &[],
            },
        );

        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Rain Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[
                        wgpu::VertexBufferLayout {
                            array_stride: size_of::<QuadVertex>() as u64,
                            step_mode: wgpu::VertexStepMode::Vertex,
                            attributes: &QUAD_ATTRIBUTES,
                        },
                        wgpu::VertexBufferLayout {
                            array_stride: size_of::<u32>() as u64,
                            step_mode: wgpu::VertexStepMode::Instance,
                            attributes: &GLYPH_ATTRIBUTES,
                        },
                    ],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::additive_target(context.format()),
                    compilation_options: Default::default(),
                }),
                primitive: pipeline_util::glyph_primitive_state(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    /// Upload the staged frame. Recreates the bind group if the strip
    /// buffer had to grow.
    pub fn upload(&mut self, context: &RenderContext, frame: &FrameData) {
        context.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&frame.uniform),
        );
        if self
            .strip_buffer
            .write(&context.device, &context.queue, &frame.strips)
        {
            self.bind_group = Self::create_bind_group(
                &context.device,
                &self.bind_group_layout,
                &self.uniform_buffer,
                &self.strip_buffer,
            );
        }
        let _ = self
            .glyph_buffer
            .write(&context.device, &context.queue, &frame.glyphs);
        self.instance_count = frame.instance_count();
    }

    /// Record the instanced draw.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        atlas: &'a wgpu::BindGroup,
    ) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_bind_group(1, atlas, &[]);
        render_pass.set_vertex_buffer(0, self.quad_vertices.slice(..));
        render_pass.set_vertex_buffer(1, self.glyph_buffer.buffer().slice(..));
        render_pass.set_index_buffer(
            self.quad_indices.slice(..),
            wgpu::IndexFormat::Uint16,
        );
        render_pass.draw_indexed(
            0..QUAD_INDICES.len() as u32,
            0,
            0..self.instance_count,
        );
    }

    /// Instances drawn per frame.
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }
}
