use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawList, QuadCmd};

/// Depth-tested renderer for flat-colored world-space quads.
///
/// Each quad becomes four vertices and two triangles `(0, 1, 2)`, `(0, 2, 3)`.
/// Back faces (clockwise on screen) are culled.
#[derive(Default)]
pub struct QuadRenderer {
    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    projection_ubo: Option<wgpu::Buffer>,

    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    quad_capacity: usize,

    vertices: Vec<QuadVertex>,
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every quad of `draw_list` into `target` under the list's projection.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        if draw_list.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_capacity(ctx, draw_list.len());

        self.vertices.clear();
        for quad in draw_list.quads() {
            push_quad_vertices(quad, &mut self.vertices);
        }

        let Some(ubo) = self.projection_ubo.as_ref() else { return };
        let proj = ProjectionUniform {
            matrix: draw_list.projection().to_cols_array_2d(),
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&proj));

        let Some(vertex_buffer) = self.vertex_buffer.as_ref() else { return };
        ctx.queue
            .write_buffer(vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(index_buffer) = self.index_buffer.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("gantry quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if let Some(vp) = effective_viewport(draw_list.viewport(), ctx.viewport) {
            rpass.set_viewport(0.0, 0.0, vp.width, vp.height, 0.0, 1.0);
        }
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vertex_buffer.slice(..));
        rpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        let index_count = (draw_list.len() * INDICES_PER_QUAD) as u32;
        rpass.draw_indexed(0..index_count, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("gantry quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("gantry quad bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ProjectionUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("gantry quad pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("gantry quad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "quad pipeline built for {:?} / {:?}",
            ctx.surface_format,
            ctx.depth_format
        );

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bindings belong to the old layout.
        self.bind_group = None;
        self.projection_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.projection_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let projection_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gantry quad projection ubo"),
            size: std::mem::size_of::<ProjectionUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gantry quad bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_ubo.as_entire_binding(),
            }],
        });

        self.projection_ubo = Some(projection_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, required_quads: usize) {
        if required_quads <= self.quad_capacity
            && self.vertex_buffer.is_some()
            && self.index_buffer.is_some()
        {
            return;
        }

        let new_cap = required_quads.next_power_of_two().max(32);

        self.vertex_buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gantry quad vbo"),
            size: (new_cap * VERTICES_PER_QUAD * std::mem::size_of::<QuadVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));

        // Index pattern only depends on the quad count, so it is written once per growth.
        let indices = quad_indices(new_cap);
        let index_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gantry quad ibo"),
            size: (indices.len() * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        ctx.queue
            .write_buffer(&index_buffer, 0, bytemuck::cast_slice(&indices));
        self.index_buffer = Some(index_buffer);

        log::debug!("quad buffers grown to {new_cap} quads");
        self.quad_capacity = new_cap;
    }
}

const VERTICES_PER_QUAD: usize = 4;
const INDICES_PER_QUAD: usize = 6;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 3],
    color: [f32; 4],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ProjectionUniform {
    matrix: [[f32; 4]; 4],
}

/// Viewport requested by the draw list, clamped to the render target.
///
/// The surface can lag a resize by a frame; wgpu rejects viewports larger than the
/// attachment.
fn effective_viewport(requested: Option<Viewport>, target: Viewport) -> Option<Viewport> {
    if !target.is_valid() {
        return None;
    }
    let vp = match requested {
        Some(r) if r.is_valid() => {
            Viewport::new(r.width.min(target.width), r.height.min(target.height))
        }
        _ => target,
    };
    Some(vp)
}

fn push_quad_vertices(quad: &QuadCmd, out: &mut Vec<QuadVertex>) {
    let color = quad.color.to_array();
    out.extend(quad.corners.iter().map(|c| QuadVertex {
        pos: c.to_array(),
        color,
    }));
}

fn quad_indices(quads: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(quads * INDICES_PER_QUAD);
    for q in 0..quads as u32 {
        let base = q * VERTICES_PER_QUAD as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    indices
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::paint::Color;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 28);
        assert_eq!(std::mem::size_of::<ProjectionUniform>(), 64);
    }

    #[test]
    fn viewport_follows_draw_list_within_target() {
        let target = Viewport::new(800.0, 600.0);
        assert_eq!(effective_viewport(None, target), Some(target));
        assert_eq!(
            effective_viewport(Some(Viewport::new(640.0, 480.0)), target),
            Some(Viewport::new(640.0, 480.0))
        );
        assert_eq!(
            effective_viewport(Some(Viewport::new(1024.0, 480.0)), target),
            Some(Viewport::new(800.0, 480.0))
        );
        assert_eq!(effective_viewport(Some(target), Viewport::new(0.0, 0.0)), None);
    }

    #[test]
    fn indices_fan_each_quad() {
        let idx = quad_indices(2);
        assert_eq!(idx, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn vertices_keep_corner_order_and_color() {
        let color = Color::opaque(1.0, 0.0, 0.0);
        let quad = QuadCmd::new(
            [
                Vec3::new(-1.0, -1.0, 0.5),
                Vec3::new(1.0, -1.0, 0.5),
                Vec3::new(1.0, 1.0, 0.5),
                Vec3::new(-1.0, 1.0, 0.5),
            ],
            color,
        );
        let mut out = Vec::new();
        push_quad_vertices(&quad, &mut out);

        assert_eq!(out.len(), VERTICES_PER_QUAD);
        assert_eq!(out[2].pos, [1.0, 1.0, 0.5]);
        assert!(out.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }
}
