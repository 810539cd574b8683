//! GPU rendering subsystem.
//!
//! Shapes own their vertex buffers; the [`Engine`] owns the pipelines and the
//! per-frame uniform/index buffers. Draws are recorded into a [`Frame`] and
//! encoded by [`Engine::submit`].
//!
//! Convention:
//! - Geometry is in virtual-space units, +Y up, origin at the surface center.
//! - The vertex shader applies `projection * model_view` to every vertex.

mod common;
mod ctx;
mod engine;
mod frame;
mod geometry;
mod pipeline;
mod primitive;
mod state;
pub mod shapes;

pub use common::{DrawUniforms, Vertex};
pub use ctx::{RenderCtx, RenderTarget};
pub use engine::{Engine, EngineConfig};
pub use frame::{DrawCall, Frame};
pub use geometry::{Dimension, GeometryBuffer};
pub use primitive::{DrawIndices, DrawPattern, FillMode, PrimitiveType, Topology};
pub use shapes::{ConvexShape, PointSet, Shading, Shape, Winding};
pub use state::DrawState;
