//! Glint: a small immediate-mode 2D rendering engine on wgpu.
//!
//! Shapes ([`PointSet`], [`ConvexShape`]) own GPU vertex buffers; a
//! [`TransformStack`] builds model-view matrices; the [`Engine`] holds the
//! projection and flat color and encodes recorded [`Frame`]s. `window` and
//! `core` provide a winit runtime to host an [`App`].

pub mod core;
pub mod device;
pub mod error;
pub mod input;
pub mod logging;
pub mod math;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;

pub use crate::core::{App, AppControl, EventCtx, FrameCtx, SetupCtx};
pub use crate::error::{EngineError, Result};
pub use crate::math::{Mat4, TransformStack, Vec2, Vec3, ViewBounds};
pub use crate::paint::Rgb;
pub use crate::render::shapes::{
    circle_outline, rect_outline, square_outline, triangle_outline, ConvexShape, PointSet,
};
pub use crate::render::{
    Dimension, Engine, EngineConfig, FillMode, Frame, GeometryBuffer, PrimitiveType,
};
