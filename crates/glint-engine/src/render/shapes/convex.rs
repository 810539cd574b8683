use std::f32::consts::TAU;

use crate::error::Result;
use crate::render::frame::Frame;
use crate::render::geometry::{Dimension, GeometryBuffer};
use crate::render::primitive::PrimitiveType;
use crate::render::RenderCtx;

use super::Shape;

/// Orientation of an outline in the xy plane.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
    /// Turns in both directions, or wraps around more than once.
    NotConvex,
    /// Fewer than three points, or all points collinear.
    Degenerate,
}

impl Winding {
    #[inline]
    pub fn is_convex(self) -> bool {
        matches!(self, Winding::CounterClockwise | Winding::Clockwise)
    }
}

/// Polygon filled with the flat color.
///
/// Drawn as a triangle fan by default, which is only correct for convex
/// outlines listed in a consistent winding order. Outlines are checked on
/// initialization and a warning is logged when they are not convex; they are
/// still accepted.
#[derive(Debug)]
pub struct ConvexShape {
    geometry: GeometryBuffer,
}

impl ConvexShape {
    pub fn new(dimension: Dimension) -> Self {
        let mut geometry = GeometryBuffer::new(dimension);
        geometry.change_primitive_type(PrimitiveType::TriangleFan);
        Self { geometry }
    }

    /// Uploads the outline vertices.
    pub fn initialize(&mut self, ctx: &RenderCtx<'_>, coordinates: &[f32]) -> Result<()> {
        self.geometry.initialize(ctx, coordinates)?;
        self.check_winding();
        Ok(())
    }

    /// Switches between filled (`TriangleFan`) and outline (`LineLoop`) etc.
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

    pub fn winding(&self) -> Winding {
        classify_outline(self.geometry.coordinates(), self.geometry.dimension())
    }

    pub fn draw<'a>(&'a self, frame: &mut Frame<'a>) {
        frame.draw(self);
    }

    fn check_winding(&self) {
        let winding = self.winding();
        if winding == Winding::NotConvex {
            log::warn!(
                "convex shape with {} points is not convex; triangle fan fill will be wrong",
                self.point_count()
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn stage(&mut self, coordinates: Vec<f32>) -> Result<()> {
        self.geometry.stage(coordinates)?;
        self.check_winding();
        Ok(())
    }
}

impl Shape for ConvexShape {
    fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }
}

const COLLINEAR_EPS: f32 = 1e-9;

/// Classifies an outline by the sign of its turns (xy projection).
pub(crate) fn classify_outline(coordinates: &[f32], dimension: Dimension) -> Winding {
    let points: Vec<(f32, f32)> = coordinates
        .chunks_exact(dimension.components())
        .map(|p| (p[0], p[1]))
        .collect();

    let n = points.len();
    if n < 3 {
        return Winding::Degenerate;
    }

    let mut positive = false;
    let mut negative = false;
    let mut total_turn = 0.0f32;

    for i in 0..n {
        let (ax, ay) = points[i];
        let (bx, by) = points[(i + 1) % n];
        let (cx, cy) = points[(i + 2) % n];

        let (e1x, e1y) = (bx - ax, by - ay);
        let (e2x, e2y) = (cx - bx, cy - by);

        let cross = e1x * e2y - e1y * e2x;
        let dot = e1x * e2x + e1y * e2y;

        if cross > COLLINEAR_EPS {
            positive = true;
        } else if cross < -COLLINEAR_EPS {
            negative = true;
        }
        total_turn += cross.atan2(dot);
    }

    match (positive, negative) {
        (false, false) => Winding::Degenerate,
        (true, true) => Winding::NotConvex,
        // Same-sign turns that sum past one revolution (e.g. a pentagram).
        _ if total_turn.abs() > TAU + 1e-3 => Winding::NotConvex,
        (true, false) => Winding::CounterClockwise,
        (false, true) => Winding::Clockwise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shapes::{circle_outline, square_outline, triangle_outline};

    fn classify(c: &[f32]) -> Winding {
        classify_outline(c, Dimension::Two)
    }

    #[test]
    fn new_shape_defaults_to_triangle_fan() {
        let s = ConvexShape::new(Dimension::Two);
        assert_eq!(s.primitive_type(), PrimitiveType::TriangleFan);
    }

    #[test]
    fn outlines_are_counter_clockwise() {
        assert_eq!(classify(&square_outline(1.0)), Winding::CounterClockwise);
        assert_eq!(classify(&circle_outline(32, 0.5)), Winding::CounterClockwise);
        assert_eq!(classify(&triangle_outline(1.0, 1.0)), Winding::CounterClockwise);
    }

    #[test]
    fn reversed_outline_is_clockwise() {
        let mut pts: Vec<[f32; 2]> = square_outline(2.0)
            .chunks_exact(2)
            .map(|p| [p[0], p[1]])
            .collect();
        pts.reverse();
        let flat: Vec<f32> = pts.concat();
        assert_eq!(classify(&flat), Winding::Clockwise);
    }

    #[test]
    fn concave_outline_is_detected() {
        // Arrow head with a notch.
        let c = [0.0, 0.0, 2.0, 1.0, 0.0, 2.0, 0.5, 1.0];
        assert_eq!(classify(&c), Winding::NotConvex);
    }

    #[test]
    fn pentagram_is_not_convex() {
        let star: Vec<f32> = (0..5)
            .flat_map(|i| {
                let a = TAU * (i * 2) as f32 / 5.0;
                [a.cos(), a.sin()]
            })
            .collect();
        assert_eq!(classify(&star), Winding::NotConvex);
    }

    #[test]
    fn degenerate_outlines() {
        assert_eq!(classify(&[0.0, 0.0, 1.0, 1.0]), Winding::Degenerate);
        assert_eq!(classify(&[0.0, 0.0, 1.0, 0.0, 2.0, 0.0]), Winding::Degenerate);
    }

    #[test]
    fn collinear_points_on_an_edge_are_tolerated() {
        let c = [0.0, 0.0, 0.5, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        assert_eq!(classify(&c), Winding::CounterClockwise);
    }

    #[test]
    fn winding_uses_xy_of_3d_points() {
        let c = [0.0, 0.0, 5.0, 1.0, 0.0, 5.0, 0.0, 1.0, 5.0];
        assert_eq!(classify_outline(&c, Dimension::Three), Winding::CounterClockwise);
    }

    #[test]
    fn non_convex_outline_is_still_accepted() {
        let mut s = ConvexShape::new(Dimension::Two);
        s.stage(vec![0.0, 0.0, 2.0, 1.0, 0.0, 2.0, 0.5, 1.0]).unwrap();
        assert_eq!(s.point_count(), 4);
        assert_eq!(s.winding(), Winding::NotConvex);
    }
}
