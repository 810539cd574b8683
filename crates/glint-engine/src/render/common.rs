//! GPU-visible layouts shared by geometry buffers and the engine pipelines.

use bytemuck::{Pod, Zeroable};

// ── vertex ────────────────────────────────────────────────────────────────

/// Interleaved vertex: position (2D coordinates get `z = 0`) + per-point color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Same vertices read once per instance, for point sprites.
    pub(crate) fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            step_mode: wgpu::VertexStepMode::Instance,
            ..Self::layout()
        }
    }
}

// ── per-draw uniform ──────────────────────────────────────────────────────

/// Uniform block consumed by one draw call.
///
/// Mirrors `DrawUniforms` in `shaders/flat.wgsl` (160 bytes, 16-byte aligned).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub flat_color: [f32; 4],
    /// Non-zero: use the vertex color attribute instead of `flat_color`.
    pub vertex_color: u32,
    pub _pad: u32,
    /// Half size of a point sprite in NDC; zero for native 1 px points.
    pub point_extent: [f32; 2],
}

/// Minimum binding size of the draw uniform block.
pub(crate) fn draw_uniforms_min_binding_size() -> Option<wgpu::BufferSize> {
    wgpu::BufferSize::new(std::mem::size_of::<DrawUniforms>() as u64)
}

/// Rounds `size` up to the next multiple of `alignment` (a power of two).
#[inline]
pub(crate) fn align_to(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 160);
        assert_eq!(std::mem::offset_of!(DrawUniforms, vertex_color), 144);
        assert_eq!(std::mem::offset_of!(DrawUniforms, point_extent), 152);
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn align_rounds_up_to_dynamic_offset_alignment() {
        assert_eq!(align_to(160, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
        assert_eq!(align_to(10, 0), 10);
    }
}
