use std::ops::Range;

use glam::{Mat4, Vec2};

use crate::error::Result;
use crate::math::{TransformStack, ViewBounds};
use crate::paint::Rgb;

use super::common::{align_to, draw_uniforms_min_binding_size, DrawUniforms};
use super::frame::Frame;
use super::pipeline::PipelineSet;
use super::primitive::{DrawIndices, FillMode, Topology};
use super::state::DrawState;
use super::{RenderCtx, RenderTarget};

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Extent of the shorter surface dimension in virtual-space units.
    pub view_size: f32,

    /// Initial flat color.
    pub flat_color: Rgb,

    /// Initial fill mode.
    pub fill_mode: FillMode,

    /// Initial point diameter in pixels.
    pub point_size: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            view_size: 1.0,
            flat_color: Rgb::WHITE,
            fill_mode: FillMode::Fill,
            point_size: 1.0,
        }
    }
}

/// Rendering context shared by every draw of a surface.
///
/// Owns the shader pipelines and the engine state (projection, flat color,
/// model-view, fill mode). Draws are recorded into a [`Frame`] obtained from
/// [`begin_frame`](Self::begin_frame) and encoded by [`submit`](Self::submit).
///
/// One engine per GPU context; pass it explicitly to whatever renders.
pub struct Engine {
    config: EngineConfig,
    bounds: ViewBounds,
    state: DrawState,

    pipelines: PipelineSet,
    uniform_stride: u64,

    uniform_ubo: Option<wgpu::Buffer>,
    uniform_bind_group: Option<wgpu::BindGroup>,
    uniform_capacity: usize,
    /// Slots already handed to submits whose commands may not have reached
    /// the queue yet.
    uniform_cursor: usize,

    index_buffer: Option<wgpu::Buffer>,
    index_capacity: usize,
    index_cursor: usize,

    warned_uninitialized: bool,
}

const MIN_UNIFORM_SLOTS: usize = 64;
const MIN_INDICES: usize = 256;

/// A draw resolved against the frame-wide buffers.
struct PreparedDraw<'a> {
    vertices: &'a wgpu::Buffer,
    topology: Topology,
    range: PreparedRange,
}

enum PreparedRange {
    Vertices(Range<u32>),
    Indices(Range<u32>),
    /// One quad instance per point.
    Sprites(u32),
}

impl Engine {
    /// Builds the shader pipeline and the initial projection for a surface of
    /// `width` x `height` pixels.
    ///
    /// Fails if the shader does not compile or the surface size is invalid; no
    /// drawing is possible in either case.
    pub fn new(
        ctx: &RenderCtx<'_>,
        config: EngineConfig,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let pipelines = PipelineSet::new(ctx.device, ctx.surface_format)?;
        let bounds = ViewBounds::from_surface(config.view_size, width, height)?;

        let uniform_stride = align_to(
            std::mem::size_of::<DrawUniforms>() as u64,
            ctx.device.limits().min_uniform_buffer_offset_alignment as u64,
        );

        let state = DrawState {
            projection: bounds.projection(),
            model_view: Mat4::IDENTITY,
            flat_color: config.flat_color,
            fill_mode: config.fill_mode,
            point_size: config.point_size,
            surface_size: Vec2::new(width as f32, height as f32),
        };

        log::debug!(
            "engine initialized: {width}x{height}, bounds {bounds:?}, uniform stride {uniform_stride}"
        );

        Ok(Self {
            config,
            bounds,
            state,
            pipelines,
            uniform_stride,
            uniform_ubo: None,
            uniform_bind_group: None,
            uniform_capacity: 0,
            uniform_cursor: 0,
            index_buffer: None,
            index_capacity: 0,
            index_cursor: 0,
            warned_uninitialized: false,
        })
    }

    // ── state ─────────────────────────────────────────────────────────────

    /// Sets an explicit orthographic projection.
    pub fn set_projection(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.set_view_bounds(ViewBounds::new(left, right, bottom, top));
    }

    pub fn set_view_bounds(&mut self, bounds: ViewBounds) {
        self.bounds = bounds;
        self.state.projection = bounds.projection();
    }

    /// Refits the projection to a new surface size, keeping
    /// `EngineConfig::view_size` across the shorter dimension.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let bounds = ViewBounds::from_surface(self.config.view_size, width, height)?;
        self.set_view_bounds(bounds);
        self.state.surface_size = Vec2::new(width as f32, height as f32);
        Ok(())
    }

    #[inline]
    pub fn view_bounds(&self) -> ViewBounds {
        self.bounds
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn set_flat_color(&mut self, color: Rgb) {
        self.state.flat_color = color;
    }

    #[inline]
    pub fn flat_color(&self) -> Rgb {
        self.state.flat_color
    }

    #[inline]
    pub fn sync_transform(&mut self, stack: &TransformStack) {
        self.state.model_view = stack.current();
    }

    #[inline]
    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.state.fill_mode = mode;
    }

    #[inline]
    pub fn fill_mode(&self) -> FillMode {
        self.state.fill_mode
    }

    #[inline]
    pub fn set_point_size(&mut self, size: f32) {
        self.state.point_size = size;
    }

    #[inline]
    pub fn point_size(&self) -> f32 {
        self.state.point_size
    }

    #[inline]
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    // ── frames ────────────────────────────────────────────────────────────

    /// Starts recording a frame from the current engine state.
    pub fn begin_frame<'a>(&self) -> Frame<'a> {
        Frame::new(self.state)
    }

    /// Encodes `frame` into `target` as a single render pass.
    ///
    /// Whatever the frame set (color, transform, fill mode, point size)
    /// becomes the engine state and carries over to the next frame. The
    /// projection and surface size stay as the engine has them.
    ///
    /// Several submits may share one encoder: each gets its own region of the
    /// uniform and index buffers. Call [`queue_submitted`](Self::queue_submitted)
    /// once the encoder reaches the queue so that space can be reused.
    pub fn submit(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: Frame<'_>,
    ) -> Result<()> {
        let (changes, clear, calls) = frame.into_parts();
        changes.apply_to(&mut self.state);

        // Draws keep the projection they were recorded with, even if the
        // engine was resized while the frame was open.
        self.ensure_pipelines(ctx)?;

        let mut uniforms: Vec<DrawUniforms> = Vec::with_capacity(calls.len());
        let mut indices: Vec<u32> = Vec::new();
        let mut prepared: Vec<PreparedDraw<'_>> = Vec::with_capacity(calls.len());

        for call in &calls {
            if call.pattern.is_empty() {
                continue;
            }
            let Some(vertices) = call.geometry.vertex_buffer() else {
                if !call.geometry.is_initialized() && !self.warned_uninitialized {
                    log::warn!("draw of an uninitialized geometry buffer skipped");
                    self.warned_uninitialized = true;
                }
                continue;
            };

            let range = match &call.pattern.indices {
                DrawIndices::Sequential(n) if call.pattern.topology == Topology::PointSprites => {
                    PreparedRange::Sprites(*n)
                }
                DrawIndices::Sequential(n) => PreparedRange::Vertices(0..*n),
                DrawIndices::Indexed(ix) => {
                    let start = indices.len() as u32;
                    indices.extend_from_slice(ix);
                    PreparedRange::Indices(start..indices.len() as u32)
                }
            };

            uniforms.push(call.uniforms);
            prepared.push(PreparedDraw {
                vertices,
                topology: call.pattern.topology,
                range,
            });
        }

        if prepared.is_empty() && clear.is_none() {
            return Ok(());
        }

        let first_slot = self.reserve_uniform_slots(ctx, uniforms.len())?;
        let first_index = self.reserve_indices(ctx, indices.len())?;
        self.write_uniforms(ctx, first_slot, &uniforms);
        if let (Some(ibo), false) = (self.index_buffer.as_ref(), indices.is_empty()) {
            let offset = (first_index * std::mem::size_of::<u32>()) as u64;
            ctx.queue.write_buffer(ibo, offset, bytemuck::cast_slice(&indices));
        }

        let load = match clear {
            Some(c) => wgpu::LoadOp::Clear(c.to_wgpu()),
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint draw pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if prepared.is_empty() {
            return Ok(());
        }
        let Some(bind_group) = self.uniform_bind_group.as_ref() else { return Ok(()) };

        if let Some(ibo) = self.index_buffer.as_ref() {
            rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
        }

        let base_index = first_index as u32;
        for (slot, draw) in prepared.iter().enumerate() {
            let offset = ((first_slot + slot) as u64 * self.uniform_stride) as u32;

            rpass.set_pipeline(self.pipelines.get(draw.topology));
            rpass.set_bind_group(0, bind_group, &[offset]);
            rpass.set_vertex_buffer(0, draw.vertices.slice(..));

            match &draw.range {
                PreparedRange::Vertices(r) => rpass.draw(r.clone(), 0..1),
                PreparedRange::Sprites(n) => rpass.draw(0..6, 0..*n),
                PreparedRange::Indices(r) => {
                    rpass.draw_indexed(base_index + r.start..base_index + r.end, 0, 0..1)
                }
            }
        }

        Ok(())
    }

    /// Releases the buffer space of every earlier submit.
    ///
    /// Only valid once the encoders those submits wrote into have been passed
    /// to `Queue::submit`; `FrameCtx::present` does this after presenting.
    pub fn queue_submitted(&mut self) {
        self.uniform_cursor = 0;
        self.index_cursor = 0;
    }

    // ── GPU resources ─────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if self.pipelines.format == ctx.surface_format {
            return Ok(());
        }
        self.pipelines = PipelineSet::new(ctx.device, ctx.surface_format)?;
        // Bind group belongs to the old layout.
        self.uniform_bind_group = None;
        self.uniform_ubo = None;
        self.uniform_capacity = 0;
        self.uniform_cursor = 0;
        Ok(())
    }

    /// Claims `count` consecutive uniform slots and returns the first.
    ///
    /// When the current buffer is full a fresh one is allocated; passes
    /// already encoded keep the old buffer alive.
    fn reserve_uniform_slots(&mut self, ctx: &RenderCtx<'_>, count: usize) -> Result<usize> {
        let fits = self.uniform_bind_group.is_some()
            && self.uniform_cursor + count <= self.uniform_capacity;

        if !fits && count > 0 {
            let new_cap = count
                .next_power_of_two()
                .max(self.uniform_capacity)
                .max(MIN_UNIFORM_SLOTS);
            let size = new_cap as u64 * self.uniform_stride;
            ctx.check_allocation("draw uniform buffer", size)?;

            let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("glint draw uniforms"),
                size,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("glint draw bind group"),
                layout: &self.pipelines.bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &ubo,
                        offset: 0,
                        size: draw_uniforms_min_binding_size(),
                    }),
                }],
            });

            log::debug!("draw uniform buffer allocated with {new_cap} slots");

            self.uniform_ubo = Some(ubo);
            self.uniform_bind_group = Some(bind_group);
            self.uniform_capacity = new_cap;
            self.uniform_cursor = 0;
        }

        let first = self.uniform_cursor;
        self.uniform_cursor += count;
        Ok(first)
    }

    /// Claims `count` consecutive indices and returns the first.
    fn reserve_indices(&mut self, ctx: &RenderCtx<'_>, count: usize) -> Result<usize> {
        let fits =
            self.index_buffer.is_some() && self.index_cursor + count <= self.index_capacity;

        if !fits && count > 0 {
            let new_cap = count
                .next_power_of_two()
                .max(self.index_capacity)
                .max(MIN_INDICES);
            let size = (new_cap * std::mem::size_of::<u32>()) as u64;
            ctx.check_allocation("index buffer", size)?;

            self.index_buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("glint frame indices"),
                size,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.index_capacity = new_cap;
            self.index_cursor = 0;

            log::debug!("index buffer allocated with {new_cap} indices");
        }

        let first = self.index_cursor;
        self.index_cursor += count;
        Ok(first)
    }

    fn write_uniforms(&self, ctx: &RenderCtx<'_>, first_slot: usize, uniforms: &[DrawUniforms]) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        if uniforms.is_empty() {
            return;
        }

        let stride = self.uniform_stride as usize;
        let mut staging = vec![0u8; uniforms.len() * stride];
        for (i, u) in uniforms.iter().enumerate() {
            let bytes = bytemuck::bytes_of(u);
            staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        ctx.queue.write_buffer(ubo, (first_slot * stride) as u64, &staging);
    }
}
