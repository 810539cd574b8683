use wgpu::util::DeviceExt;

use crate::error::{EngineError, Result};

use super::common::Vertex;
use super::frame::Frame;
use super::primitive::PrimitiveType;
use super::RenderCtx;

/// Number of components per point, fixed for the lifetime of a buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Dimension {
    Two,
    Three,
}

impl Dimension {
    #[inline]
    pub const fn components(self) -> usize {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }

    /// Number of points in a flat coordinate list.
    pub fn point_count(self, len: usize) -> Result<usize> {
        let d = self.components();
        if len % d != 0 {
            return Err(EngineError::DimensionMismatch { len, dimension: d });
        }
        Ok(len / d)
    }
}

/// GPU-side state of a geometry buffer.
#[derive(Debug, Default)]
enum GpuState {
    #[default]
    Uninitialized,
    /// Initialized with zero points; nothing to allocate.
    Empty,
    Ready(wgpu::Buffer),
}

/// Vertex buffer owned together with its CPU-side mirror.
///
/// Lifecycle: created uninitialized, [`initialize`](Self::initialize) uploads the
/// coordinates (again on every call), the primitive type can change freely
/// afterwards, and dropping the buffer releases the GPU allocation.
#[derive(Debug)]
pub struct GeometryBuffer {
    dimension: Dimension,
    coordinates: Vec<f32>,
    primitive: PrimitiveType,
    gpu: GpuState,
}

impl GeometryBuffer {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            coordinates: Vec::new(),
            primitive: PrimitiveType::default(),
            gpu: GpuState::Uninitialized,
        }
    }

    /// Uploads `coordinates` (flat, `dimension` components per point).
    ///
    /// Fails when the coordinate count does not match the dimension or the
    /// device cannot hold the buffer; the buffer is then left uninitialized.
    pub fn initialize(&mut self, ctx: &RenderCtx<'_>, coordinates: &[f32]) -> Result<()> {
        self.upload(ctx, coordinates.to_vec(), None)
    }

    /// Changes how points are interpreted on the next draw.
    #[inline]
    pub fn change_primitive_type(&mut self, primitive: PrimitiveType) {
        self.primitive = primitive;
    }

    #[inline]
    pub fn primitive_type(&self) -> PrimitiveType {
        self.primitive
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.coordinates.len() / self.dimension.components()
    }

    #[inline]
    pub fn coordinates(&self) -> &[f32] {
        &self.coordinates
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        !matches!(self.gpu, GpuState::Uninitialized)
    }

    /// Records a draw of this buffer into `frame`, with flat shading.
    ///
    /// Uses whatever color and transform the frame currently holds; call
    /// `Frame::set_flat_color` / `Frame::sync_transform` first, or use
    /// `Frame::draw_with`.
    pub fn draw<'a>(&'a self, frame: &mut Frame<'a>) {
        frame.draw(self);
    }

    pub(crate) fn vertex_buffer(&self) -> Option<&wgpu::Buffer> {
        match &self.gpu {
            GpuState::Ready(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Validates and stores the CPU mirror; GPU state is reset.
    pub(crate) fn stage(&mut self, coordinates: Vec<f32>) -> Result<()> {
        self.gpu = GpuState::Uninitialized;
        self.coordinates.clear();
        self.dimension.point_count(coordinates.len())?;
        self.coordinates = coordinates;
        Ok(())
    }

    /// Stages `coordinates` and replaces the GPU buffer.
    ///
    /// `colors` holds one RGB triple per point when present.
    pub(crate) fn upload(
        &mut self,
        ctx: &RenderCtx<'_>,
        coordinates: Vec<f32>,
        colors: Option<&[f32]>,
    ) -> Result<()> {
        self.stage(coordinates)?;

        let vertices = match build_vertices(&self.coordinates, self.dimension, colors) {
            Ok(v) => v,
            Err(e) => {
                self.coordinates.clear();
                return Err(e);
            }
        };

        if vertices.is_empty() {
            self.gpu = GpuState::Empty;
            return Ok(());
        }

        let size = (vertices.len() * std::mem::size_of::<Vertex>()) as u64;
        if let Err(e) = ctx.check_allocation("geometry vertex buffer", size) {
            self.coordinates.clear();
            return Err(e);
        }

        let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint geometry vbo"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        self.gpu = GpuState::Ready(buffer);
        Ok(())
    }
}

/// Interleaves coordinates and optional per-point colors.
///
/// 2D points are placed on `z = 0`. Without colors, the color attribute is
/// zeroed (flat shading ignores it).
pub(crate) fn build_vertices(
    coordinates: &[f32],
    dimension: Dimension,
    colors: Option<&[f32]>,
) -> Result<Vec<Vertex>> {
    let points = dimension.point_count(coordinates.len())?;

    if let Some(colors) = colors {
        if colors.len() != points * 3 {
            return Err(EngineError::ColorCountMismatch {
                points,
                expected: points * 3,
                got: colors.len(),
            });
        }
    }

    let vertices = coordinates
        .chunks_exact(dimension.components())
        .enumerate()
        .map(|(i, p)| Vertex {
            position: [p[0], p[1], p.get(2).copied().unwrap_or(0.0)],
            color: colors
                .map(|c| [c[i * 3], c[i * 3 + 1], c[i * 3 + 2]])
                .unwrap_or([0.0; 3]),
        })
        .collect();

    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(dimension: Dimension, coords: &[f32]) -> GeometryBuffer {
        let mut g = GeometryBuffer::new(dimension);
        g.stage(coords.to_vec()).unwrap();
        g
    }

    #[test]
    fn new_buffer_is_uninitialized_points() {
        let g = GeometryBuffer::new(Dimension::Two);
        assert!(!g.is_initialized());
        assert_eq!(g.point_count(), 0);
        assert_eq!(g.primitive_type(), PrimitiveType::Points);
    }

    #[test]
    fn point_count_follows_dimension() {
        assert_eq!(staged(Dimension::Two, &[0.0; 8]).point_count(), 4);
        assert_eq!(staged(Dimension::Three, &[0.0; 9]).point_count(), 3);
        assert_eq!(staged(Dimension::Two, &[]).point_count(), 0);
    }

    #[test]
    fn mismatched_coordinates_are_rejected() {
        let mut g = GeometryBuffer::new(Dimension::Two);
        let err = g.stage(vec![0.0, 1.0, 2.0]).unwrap_err();
        assert_eq!(err, EngineError::DimensionMismatch { len: 3, dimension: 2 });
        assert_eq!(g.point_count(), 0);
        assert!(!g.is_initialized());

        let mut g = GeometryBuffer::new(Dimension::Three);
        assert!(g.stage(vec![0.0; 4]).is_err());
    }

    #[test]
    fn failed_restage_drops_previous_contents() {
        let mut g = staged(Dimension::Two, &[1.0, 2.0]);
        assert!(g.stage(vec![1.0]).is_err());
        assert!(g.coordinates().is_empty());
    }

    #[test]
    fn change_primitive_keeps_contents() {
        let coords = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let mut g = staged(Dimension::Two, &coords);
        for p in [
            PrimitiveType::LineLoop,
            PrimitiveType::TriangleFan,
            PrimitiveType::Lines,
            PrimitiveType::Points,
        ] {
            g.change_primitive_type(p);
            assert_eq!(g.primitive_type(), p);
            assert_eq!(g.point_count(), 4);
            assert_eq!(g.coordinates(), &coords);
        }
    }

    #[test]
    fn vertices_lift_2d_points_to_z_zero() {
        let v = build_vertices(&[1.0, 2.0, 3.0, 4.0], Dimension::Two, None).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].position, [1.0, 2.0, 0.0]);
        assert_eq!(v[1].position, [3.0, 4.0, 0.0]);
        assert_eq!(v[1].color, [0.0; 3]);
    }

    #[test]
    fn vertices_keep_3d_depth_and_colors() {
        let v = build_vertices(
            &[1.0, 2.0, 3.0],
            Dimension::Three,
            Some(&[0.25, 0.5, 0.75]),
        )
        .unwrap();
        assert_eq!(v[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(v[0].color, [0.25, 0.5, 0.75]);
    }

    #[test]
    fn color_count_must_match_points() {
        let err = build_vertices(&[0.0; 4], Dimension::Two, Some(&[1.0; 3])).unwrap_err();
        assert_eq!(
            err,
            EngineError::ColorCountMismatch { points: 2, expected: 6, got: 3 }
        );
    }
}
