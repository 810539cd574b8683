//! Drawable shapes built on [`GeometryBuffer`].
//!
//! - [`PointSet`]: growable points with one color per point.
//! - [`ConvexShape`]: static outline filled with the flat color.
//! - outline helpers producing counter-clockwise vertex lists.

mod convex;
mod outline;
mod point_set;

pub use convex::{ConvexShape, Winding};
pub use outline::{circle_outline, rect_outline, square_outline, triangle_outline};
pub use point_set::PointSet;

use super::geometry::GeometryBuffer;

/// Color source of a draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Shading {
    /// Every vertex takes the frame's flat color.
    Flat,
    /// Every vertex takes its own color attribute.
    PerVertex,
}

/// Anything the engine can record a draw for.
pub trait Shape {
    fn geometry(&self) -> &GeometryBuffer;

    fn shading(&self) -> Shading {
        Shading::Flat
    }
}

impl Shape for GeometryBuffer {
    fn geometry(&self) -> &GeometryBuffer {
        self
    }
}
