use crate::error::{EngineError, Result};
use crate::paint::Rgb;
use crate::render::frame::Frame;
use crate::render::geometry::{Dimension, GeometryBuffer};
use crate::render::primitive::PrimitiveType;
use crate::render::RenderCtx;

use super::{Shading, Shape};

/// Ordered points, each with its own color.
///
/// Colors are stored as RGB triples parallel to the coordinates. Every
/// mutation re-uploads the whole set, so the GPU copy is always complete and
/// in insertion order.
#[derive(Debug)]
pub struct PointSet {
    geometry: GeometryBuffer,
    colors: Vec<f32>,
}

impl PointSet {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            geometry: GeometryBuffer::new(dimension),
            colors: Vec::new(),
        }
    }

    /// Replaces the set with `coordinates` and their `colors` (3 per point).
    pub fn init_set(
        &mut self,
        ctx: &RenderCtx<'_>,
        coordinates: &[f32],
        colors: &[f32],
    ) -> Result<()> {
        self.colors.clear();
        self.geometry.upload(ctx, coordinates.to_vec(), Some(colors))?;
        self.colors = colors.to_vec();
        Ok(())
    }

    /// Appends one point and re-synchronizes the GPU buffer.
    ///
    /// `point` must have exactly `dimension` components.
    pub fn append(&mut self, ctx: &RenderCtx<'_>, point: &[f32], color: Rgb) -> Result<()> {
        let (coordinates, colors) = self.appended(point, color)?;
        self.colors.clear();
        self.geometry.upload(ctx, coordinates, Some(&colors))?;
        self.colors = colors;
        Ok(())
    }

    /// Removes every point (the set stays initialized).
    pub fn clear(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        self.init_set(ctx, &[], &[])
    }

    #[inline]
    pub fn change_primitive_type(&mut self, primitive: PrimitiveType) {
        self.geometry.change_primitive_type(primitive);
    }

    #[inline]
    pub fn primitive_type(&self) -> PrimitiveType {
        self.geometry.primitive_type()
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.geometry.point_count()
    }

    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Color of the point at `index`.
    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.colors
            .get(index * 3..index * 3 + 3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
    }

    /// Records a per-vertex colored draw into `frame`.
    pub fn draw<'a>(&'a self, frame: &mut Frame<'a>) {
        frame.draw(self);
    }

    /// New coordinate and color lists with `point` appended.
    fn appended(&self, point: &[f32], color: Rgb) -> Result<(Vec<f32>, Vec<f32>)> {
        let dimension = self.geometry.dimension().components();
        if point.len() != dimension {
            return Err(EngineError::PointArity {
                got: point.len(),
                dimension,
            });
        }

        let mut coordinates = Vec::with_capacity(self.geometry.coordinates().len() + dimension);
        coordinates.extend_from_slice(self.geometry.coordinates());
        coordinates.extend_from_slice(point);

        let mut colors = Vec::with_capacity(self.colors.len() + 3);
        colors.extend_from_slice(&self.colors);
        colors.extend_from_slice(&color.to_array());

        Ok((coordinates, colors))
    }

    /// CPU-only counterpart of `init_set`.
    #[cfg(test)]
    pub(crate) fn stage(&mut self, coordinates: Vec<f32>, colors: Vec<f32>) -> Result<()> {
        let dimension = self.geometry.dimension();
        crate::render::geometry::build_vertices(&coordinates, dimension, Some(&colors))?;
        self.geometry.stage(coordinates)?;
        self.colors = colors;
        Ok(())
    }

    /// CPU-only counterpart of `append`.
    #[cfg(test)]
    pub(crate) fn stage_append(&mut self, point: &[f32], color: Rgb) -> Result<()> {
        let (coordinates, colors) = self.appended(point, color)?;
        self.stage(coordinates, colors)
    }
}

impl Shape for PointSet {
    fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    fn shading(&self) -> Shading {
        Shading::PerVertex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::primitive::{DrawIndices, DrawPattern, FillMode};

    #[test]
    fn append_preserves_insertion_order() {
        let mut set = PointSet::new(Dimension::Two);
        set.stage(Vec::new(), Vec::new()).unwrap();

        let a = [0.0, 0.0];
        let b = [1.0, 0.0];
        let c = [0.0, 1.0];
        set.stage_append(&a, Rgb::RED).unwrap();
        set.stage_append(&b, Rgb::GREEN).unwrap();
        set.stage_append(&c, Rgb::BLUE).unwrap();

        assert_eq!(set.point_count(), 3);
        assert_eq!(set.geometry().coordinates(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(set.color(0), Some(Rgb::RED));
        assert_eq!(set.color(1), Some(Rgb::GREEN));
        assert_eq!(set.color(2), Some(Rgb::BLUE));
        assert_eq!(set.color(3), None);
    }

    #[test]
    fn line_loop_connects_points_cyclically() {
        let mut set = PointSet::new(Dimension::Two);
        for p in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]] {
            set.stage_append(&p, Rgb::WHITE).unwrap();
        }
        set.change_primitive_type(PrimitiveType::LineLoop);

        let pattern = DrawPattern::resolve(
            set.primitive_type(),
            set.point_count() as u32,
            FillMode::Fill,
        );
        assert_eq!(pattern.indices, DrawIndices::Indexed(vec![0, 1, 2, 0]));
    }

    #[test]
    fn append_rejects_wrong_arity() {
        let mut set = PointSet::new(Dimension::Two);
        set.stage_append(&[1.0, 2.0], Rgb::WHITE).unwrap();

        let err = set.stage_append(&[1.0, 2.0, 3.0], Rgb::WHITE).unwrap_err();
        assert_eq!(err, EngineError::PointArity { got: 3, dimension: 2 });
        assert_eq!(set.point_count(), 1);
        assert_eq!(set.colors().len(), 3);
    }

    #[test]
    fn three_dimensional_points() {
        let mut set = PointSet::new(Dimension::Three);
        set.stage_append(&[1.0, 2.0, 3.0], Rgb::WHITE).unwrap();
        assert_eq!(set.point_count(), 1);
        assert!(set.stage_append(&[1.0, 2.0], Rgb::WHITE).is_err());
    }

    #[test]
    fn stage_rejects_color_mismatch() {
        let mut set = PointSet::new(Dimension::Two);
        let err = set.stage(vec![0.0; 4], vec![1.0; 5]).unwrap_err();
        assert!(matches!(err, EngineError::ColorCountMismatch { points: 2, .. }));
    }
}
