use anyhow::{ensure, Result};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::geometry::{GizmoCapacity, GizmoLine, GizmoTri, GizmoVertex, Gizmos};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    min_binding_size, sequential_indices, straight_alpha_blend, CAMERA_PROJECTION, CAMERA_VIEW,
};
use super::plan::{BatchKind, DrawPlan};
use super::shader::{create_gizmo_shader, FRAGMENT_ENTRY, VERTEX_ENTRY};
use super::uniform::{UniformBlock, UniformKind, UniformValue};

/// Depth attachment settings for the gizmo pipelines.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DepthConfig {
    pub format: wgpu::TextureFormat,
    /// `Always` draws gizmos on top of scene geometry while still writing
    /// depth for lines and opaque triangles.
    pub compare: wgpu::CompareFunction,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            format: wgpu::TextureFormat::Depth32Float,
            compare: wgpu::CompareFunction::Always,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct GizmoRendererConfig {
    /// `None` renders without a depth attachment. When set, every
    /// `RenderTarget` passed to [`GizmoRenderer::draw`] must carry a depth
    /// view of this format.
    pub depth: Option<DepthConfig>,
}

impl GizmoRendererConfig {
    #[inline]
    pub fn with_depth(depth: DepthConfig) -> Self {
        Self { depth: Some(depth) }
    }
}

struct Pipelines {
    format: wgpu::TextureFormat,
    lines: wgpu::RenderPipeline,
    opaque: wgpu::RenderPipeline,
    alpha: wgpu::RenderPipeline,
}

impl Pipelines {
    fn get(&self, kind: BatchKind) -> &wgpu::RenderPipeline {
        match kind {
            BatchKind::Lines => &self.lines,
            BatchKind::OpaqueTris => &self.opaque,
            BatchKind::AlphaTris => &self.alpha,
        }
    }
}

/// wgpu backend for [`Gizmos`].
///
/// Owns one vertex buffer per geometry set, sized to the capacity it was
/// created with, plus two static index buffers holding `0..n`. Each frame
/// uploads only the live prefix of every non-empty set and issues one
/// indexed draw per set, in a single render pass that loads and stores the
/// existing target contents.
pub struct GizmoRenderer {
    config: GizmoRendererConfig,
    capacity: GizmoCapacity,

    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: Pipelines,

    bind_group: wgpu::BindGroup,
    camera_ubo: wgpu::Buffer,
    camera: UniformBlock,

    line_vbo: wgpu::Buffer,
    opaque_vbo: wgpu::Buffer,
    alpha_vbo: wgpu::Buffer,

    line_ibo: wgpu::Buffer,
    tri_ibo: wgpu::Buffer,

    /// CPU-side upload bytes, reused across frames.
    staging: Vec<u8>,
}

impl GizmoRenderer {
    pub fn new(ctx: &RenderCtx<'_>, capacity: GizmoCapacity, config: GizmoRendererConfig) -> Result<Self> {
        let line_bytes = vertex_buffer_size::<GizmoLine>(capacity.max_lines);
        let tri_bytes = vertex_buffer_size::<GizmoTri>(capacity.max_tris);
        let max_buffer_size = ctx.device.limits().max_buffer_size;
        ensure!(
            line_bytes <= max_buffer_size && tri_bytes <= max_buffer_size,
            "gizmo capacity {capacity:?} needs {} byte buffers, device allows {max_buffer_size}",
            line_bytes.max(tri_bytes)
        );

        let shader = create_gizmo_shader(ctx.device)?;

        let camera = UniformBlock::new(&[
            (CAMERA_VIEW, UniformKind::Mat4),
            (CAMERA_PROJECTION, UniformKind::Mat4),
        ]);

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gizmo camera bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: min_binding_size(camera.size()),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("gizmo pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gizmo camera ubo"),
            size: camera.size(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gizmo camera bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        let pipelines = build_pipelines(ctx.device, &shader, &pipeline_layout, ctx.surface_format, config.depth);

        let vbo = |label: &'static str, size: u64| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let line_vbo = vbo("gizmo line vbo", line_bytes);
        let opaque_vbo = vbo("gizmo opaque tri vbo", tri_bytes);
        let alpha_vbo = vbo("gizmo alpha tri vbo", tri_bytes);

        let ibo = |label: &'static str, count: u32| {
            ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&sequential_indices(count.max(1))),
                usage: wgpu::BufferUsages::INDEX,
            })
        };
        let line_ibo = ibo("gizmo line ibo", capacity.max_lines.saturating_mul(GizmoLine::VERTICES));
        let tri_ibo = ibo("gizmo tri ibo", capacity.max_tris.saturating_mul(GizmoTri::VERTICES));

        log::debug!(
            "gizmo renderer created: format={:?} depth={:?} max_lines={} max_tris={}",
            ctx.surface_format,
            config.depth,
            capacity.max_lines,
            capacity.max_tris
        );

        Ok(Self {
            config,
            capacity,
            shader,
            pipeline_layout,
            pipelines,
            bind_group,
            camera_ubo,
            camera,
            line_vbo,
            opaque_vbo,
            alpha_vbo,
            line_ibo,
            tri_ibo,
            staging: Vec::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> GizmoRendererConfig {
        self.config
    }

    #[inline]
    pub fn capacity(&self) -> GizmoCapacity {
        self.capacity
    }

    /// Records one render pass drawing every live primitive of `gizmos`.
    ///
    /// Vertex and camera uploads are recorded into `target.encoder` ahead of
    /// the pass, so several `draw` calls may share one encoder or one submit
    /// and each pass sees its own data.
    ///
    /// Does nothing when `gizmos` is empty. Primitives beyond this
    /// renderer's capacity (a `Gizmos` built with a larger budget) are not
    /// drawn.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        gizmos: &Gizmos,
        view: &Mat4,
        projection: &Mat4,
    ) {
        let Some(plan) = DrawPlan::for_frame(gizmos) else { return };

        if self.config.depth.is_some() != target.depth_view.is_some() {
            log::error!(
                "gizmo draw skipped: renderer depth={:?} but target depth view present={}",
                self.config.depth,
                target.depth_view.is_some()
            );
            return;
        }

        self.ensure_pipelines(ctx);
        if let Err(err) = self.stage_uploads(ctx, target.encoder, gizmos, &plan, view, projection) {
            log::error!("gizmo draw skipped: {err:#}");
            return;
        }

        let depth_stencil_attachment = target.depth_view.map(|depth_view| wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        });

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("gizmo pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, &self.bind_group, &[]);

        for batch in plan.iter() {
            let vbo = self.vertex_buffer(batch.kind);
            let upload = batch.upload_bytes.min(vbo.size());
            let index_count = batch.index_count.min(self.index_capacity(batch.kind));
            if upload == 0 || index_count == 0 {
                continue;
            }

            log::trace!(
                "gizmo batch {}: {} primitives, {} indices",
                batch.kind.label(),
                batch.primitives,
                index_count
            );

            rpass.set_pipeline(self.pipelines.get(batch.kind));
            rpass.set_vertex_buffer(0, vbo.slice(..upload));
            rpass.set_index_buffer(self.index_buffer(batch.kind).slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..index_count, 0, 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipelines.format == ctx.surface_format {
            return;
        }
        log::debug!(
            "gizmo pipelines rebuilt: {:?} -> {:?}",
            self.pipelines.format,
            ctx.surface_format
        );
        self.pipelines = build_pipelines(
            ctx.device,
            &self.shader,
            &self.pipeline_layout,
            ctx.surface_format,
            self.config.depth,
        );
    }

    /// Packs the dirty camera block and every batch's live prefix into one
    /// staging buffer and records copies into the destination buffers.
    fn stage_uploads(
        &mut self,
        ctx: &RenderCtx<'_>,
        encoder: &mut wgpu::CommandEncoder,
        gizmos: &Gizmos,
        plan: &DrawPlan,
        view: &Mat4,
        projection: &Mat4,
    ) -> Result<()> {
        self.camera.set(CAMERA_VIEW, UniformValue::Mat4(*view))?;
        self.camera.set(CAMERA_PROJECTION, UniformValue::Mat4(*projection))?;

        let mut staged = std::mem::take(&mut self.staging);
        staged.clear();
        let mut copies: Vec<(Option<BatchKind>, u64, u64)> = Vec::with_capacity(4);

        if let Some(bytes) = self.camera.take_dirty_bytes() {
            copies.push((None, staged.len() as u64, bytes.len() as u64));
            staged.extend_from_slice(bytes);
        }
        for batch in plan.iter() {
            let bytes = clamp_to(batch.bytes(gizmos), self.vertex_buffer(batch.kind).size());
            copies.push((Some(batch.kind), staged.len() as u64, bytes.len() as u64));
            staged.extend_from_slice(bytes);
        }

        if !staged.is_empty() {
            let staging = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("gizmo upload staging"),
                contents: &staged,
                usage: wgpu::BufferUsages::COPY_SRC,
            });
            for (kind, offset, size) in copies {
                let destination = match kind {
                    Some(kind) => self.vertex_buffer(kind),
                    None => &self.camera_ubo,
                };
                encoder.copy_buffer_to_buffer(&staging, offset, destination, 0, size);
            }
        }

        self.staging = staged;
        Ok(())
    }

    fn vertex_buffer(&self, kind: BatchKind) -> &wgpu::Buffer {
        match kind {
            BatchKind::Lines => &self.line_vbo,
            BatchKind::OpaqueTris => &self.opaque_vbo,
            BatchKind::AlphaTris => &self.alpha_vbo,
        }
    }

    fn index_buffer(&self, kind: BatchKind) -> &wgpu::Buffer {
        match kind {
            BatchKind::Lines => &self.line_ibo,
            BatchKind::OpaqueTris | BatchKind::AlphaTris => &self.tri_ibo,
        }
    }

    fn index_capacity(&self, kind: BatchKind) -> u32 {
        match kind {
            BatchKind::Lines => self.capacity.max_lines.saturating_mul(GizmoLine::VERTICES),
            BatchKind::OpaqueTris | BatchKind::AlphaTris => {
                self.capacity.max_tris.saturating_mul(GizmoTri::VERTICES)
            }
        }
    }
}

/// Bytes for `capacity` primitives of `T`. Never zero, so a zero capacity
/// still yields a valid buffer.
fn vertex_buffer_size<T>(capacity: u32) -> u64 {
    capacity.max(1) as u64 * std::mem::size_of::<T>() as u64
}

fn clamp_to(bytes: &[u8], limit: u64) -> &[u8] {
    &bytes[..bytes.len().min(limit as usize)]
}

fn build_pipelines(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    depth: Option<DepthConfig>,
) -> Pipelines {
    let build = |kind: BatchKind, topology: wgpu::PrimitiveTopology| {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(pipeline_label(kind)),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[GizmoVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(straight_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: depth.map(|depth| depth_state(depth, kind)),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    };

    Pipelines {
        format,
        lines: build(BatchKind::Lines, wgpu::PrimitiveTopology::LineList),
        opaque: build(BatchKind::OpaqueTris, wgpu::PrimitiveTopology::TriangleList),
        alpha: build(BatchKind::AlphaTris, wgpu::PrimitiveTopology::TriangleList),
    }
}

fn depth_state(depth: DepthConfig, kind: BatchKind) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: depth.format,
        depth_write_enabled: kind.writes_depth(),
        depth_compare: depth.compare,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

fn pipeline_label(kind: BatchKind) -> &'static str {
    match kind {
        BatchKind::Lines => "gizmo line pipeline",
        BatchKind::OpaqueTris => "gizmo opaque tri pipeline",
        BatchKind::AlphaTris => "gizmo alpha tri pipeline",
    }
}
