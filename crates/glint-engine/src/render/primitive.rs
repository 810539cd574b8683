//! Primitive interpretation of a point sequence.
//!
//! wgpu only knows list and strip topologies. Loops and fans are resolved into
//! index lists here, on the CPU, every time a draw is recorded; changing the
//! primitive type therefore never touches vertex memory.

/// How a sequence of points is interpreted when drawn.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PrimitiveType {
    #[default]
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl PrimitiveType {
    /// Whether the primitive fills area (affected by [`FillMode::Wireframe`]).
    #[inline]
    pub fn is_filled(self) -> bool {
        matches!(
            self,
            PrimitiveType::Triangles | PrimitiveType::TriangleStrip | PrimitiveType::TriangleFan
        )
    }
}

/// Rasterization of filled primitives.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FillMode {
    #[default]
    Fill,
    /// Triangle edges only.
    Wireframe,
}

/// Topologies the engine builds pipelines for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
    /// Points wider than one pixel: a two-triangle quad per point, drawn
    /// instanced over the point vertices.
    PointSprites,
}

impl Topology {
    pub const ALL: [Topology; 6] = [
        Topology::PointList,
        Topology::LineList,
        Topology::LineStrip,
        Topology::TriangleList,
        Topology::TriangleStrip,
        Topology::PointSprites,
    ];

    #[inline]
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::PointList => wgpu::PrimitiveTopology::PointList,
            Topology::LineList => wgpu::PrimitiveTopology::LineList,
            Topology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            Topology::TriangleList | Topology::PointSprites => {
                wgpu::PrimitiveTopology::TriangleList
            }
            Topology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }

    /// Strip topologies need an index format when drawn indexed.
    #[inline]
    pub fn strip_index_format(self) -> Option<wgpu::IndexFormat> {
        match self {
            Topology::LineStrip | Topology::TriangleStrip => Some(wgpu::IndexFormat::Uint32),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            Topology::PointList => 0,
            Topology::LineList => 1,
            Topology::LineStrip => 2,
            Topology::TriangleList => 3,
            Topology::TriangleStrip => 4,
            Topology::PointSprites => 5,
        }
    }
}

/// Vertices to feed the GPU for one draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawIndices {
    /// Non-indexed draw of vertices `0..count`.
    Sequential(u32),
    /// Indexed draw.
    Indexed(Vec<u32>),
}

impl DrawIndices {
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            DrawIndices::Sequential(n) => *n == 0,
            DrawIndices::Indexed(ix) => ix.is_empty(),
        }
    }
}

/// Resolved topology + vertex order for a primitive type and point count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawPattern {
    pub topology: Topology,
    pub indices: DrawIndices,
}

impl DrawPattern {
    /// Resolves `primitive` over `count` points.
    pub fn resolve(primitive: PrimitiveType, count: u32, fill: FillMode) -> Self {
        if fill == FillMode::Wireframe && primitive.is_filled() {
            return Self::indexed(Topology::LineList, triangle_edges(&triangles(primitive, count)));
        }

        match primitive {
            PrimitiveType::Points => Self::sequential(Topology::PointList, count),
            PrimitiveType::Lines => Self::sequential(Topology::LineList, count - count % 2),
            PrimitiveType::LineStrip => {
                Self::sequential(Topology::LineStrip, if count < 2 { 0 } else { count })
            }
            PrimitiveType::LineLoop => {
                if count < 2 {
                    return Self::sequential(Topology::LineStrip, 0);
                }
                let indices = (0..count).chain(std::iter::once(0)).collect();
                Self::indexed(Topology::LineStrip, indices)
            }
            PrimitiveType::Triangles => {
                Self::sequential(Topology::TriangleList, count - count % 3)
            }
            PrimitiveType::TriangleStrip => {
                Self::sequential(Topology::TriangleStrip, if count < 3 { 0 } else { count })
            }
            PrimitiveType::TriangleFan => {
                Self::indexed(Topology::TriangleList, triangles(primitive, count))
            }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn sequential(topology: Topology, count: u32) -> Self {
        Self {
            topology,
            indices: DrawIndices::Sequential(count),
        }
    }

    fn indexed(topology: Topology, indices: Vec<u32>) -> Self {
        Self {
            topology,
            indices: DrawIndices::Indexed(indices),
        }
    }
}

/// Triangle list indices produced by a filled primitive.
fn triangles(primitive: PrimitiveType, count: u32) -> Vec<u32> {
    match primitive {
        PrimitiveType::Triangles => (0..count - count % 3).collect(),
        PrimitiveType::TriangleStrip if count >= 3 => (0..count - 2)
            .flat_map(|i| {
                // Alternate winding so every strip triangle keeps the first one's.
                if i % 2 == 0 {
                    [i, i + 1, i + 2]
                } else {
                    [i + 1, i, i + 2]
                }
            })
            .collect(),
        PrimitiveType::TriangleFan if count >= 3 => {
            (1..count - 1).flat_map(|i| [0, i, i + 1]).collect()
        }
        _ => Vec::new(),
    }
}

/// Converts a triangle list into a line list of its edges.
fn triangle_edges(tris: &[u32]) -> Vec<u32> {
    tris.chunks_exact(3)
        .flat_map(|t| [t[0], t[1], t[1], t[2], t[2], t[0]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(p: PrimitiveType, n: u32) -> DrawPattern {
        DrawPattern::resolve(p, n, FillMode::Fill)
    }

    #[test]
    fn default_primitive_is_points() {
        assert_eq!(PrimitiveType::default(), PrimitiveType::Points);
    }

    #[test]
    fn points_draw_every_vertex() {
        let p = resolve(PrimitiveType::Points, 5);
        assert_eq!(p.topology, Topology::PointList);
        assert_eq!(p.indices, DrawIndices::Sequential(5));
    }

    #[test]
    fn lines_drop_unpaired_vertex() {
        assert_eq!(resolve(PrimitiveType::Lines, 5).indices, DrawIndices::Sequential(4));
    }

    #[test]
    fn line_loop_closes_in_insertion_order() {
        let p = resolve(PrimitiveType::LineLoop, 3);
        assert_eq!(p.topology, Topology::LineStrip);
        assert_eq!(p.indices, DrawIndices::Indexed(vec![0, 1, 2, 0]));
    }

    #[test]
    fn line_loop_with_one_point_is_empty() {
        assert!(resolve(PrimitiveType::LineLoop, 1).is_empty());
        assert!(resolve(PrimitiveType::LineLoop, 0).is_empty());
    }

    #[test]
    fn triangle_fan_becomes_triangle_list() {
        let p = resolve(PrimitiveType::TriangleFan, 4);
        assert_eq!(p.topology, Topology::TriangleList);
        assert_eq!(p.indices, DrawIndices::Indexed(vec![0, 1, 2, 0, 2, 3]));
    }

    #[test]
    fn triangle_fan_needs_three_points() {
        assert!(resolve(PrimitiveType::TriangleFan, 2).is_empty());
    }

    #[test]
    fn triangles_truncate_to_multiple_of_three() {
        assert_eq!(resolve(PrimitiveType::Triangles, 7).indices, DrawIndices::Sequential(6));
    }

    #[test]
    fn wireframe_fan_outlines_each_triangle() {
        let p = DrawPattern::resolve(PrimitiveType::TriangleFan, 4, FillMode::Wireframe);
        assert_eq!(p.topology, Topology::LineList);
        assert_eq!(
            p.indices,
            DrawIndices::Indexed(vec![0, 1, 1, 2, 2, 0, 0, 2, 2, 3, 3, 0])
        );
    }

    #[test]
    fn wireframe_strip_keeps_winding() {
        let p = DrawPattern::resolve(PrimitiveType::TriangleStrip, 4, FillMode::Wireframe);
        assert_eq!(
            p.indices,
            DrawIndices::Indexed(vec![0, 1, 1, 2, 2, 0, 2, 1, 1, 3, 3, 2])
        );
    }

    #[test]
    fn wireframe_leaves_lines_untouched() {
        let p = DrawPattern::resolve(PrimitiveType::LineLoop, 3, FillMode::Wireframe);
        assert_eq!(p, resolve(PrimitiveType::LineLoop, 3));
    }

    #[test]
    fn topology_slots_are_distinct() {
        let mut slots: Vec<usize> = Topology::ALL.iter().map(|t| t.slot()).collect();
        slots.sort_unstable();
        assert_eq!(slots, vec![0, 1, 2, 3, 4, 5]);
    }
}
