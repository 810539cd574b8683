//! Transform and projection math for the virtual 2D space.
//!
//! Conventions:
//! - virtual space is centered on the origin, +X right, +Y up
//! - matrices are column-major `glam::Mat4`, composed by right-multiplication
//! - rotation angles are radians

mod transform_stack;
mod view_bounds;

pub use transform_stack::TransformStack;
pub use view_bounds::ViewBounds;

pub use glam::{Mat4, Vec2, Vec3};
