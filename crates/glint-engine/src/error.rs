//! Engine error type.
//!
//! Two families live here:
//! - environment failures (`Allocation`, `Shader`, `InvalidSurface`): nothing can
//!   be drawn without the resource, callers usually bail out.
//! - contract violations (`DimensionMismatch`, `ColorCountMismatch`,
//!   `PointArity`, `StackUnderflow`): reported at the point of misuse instead of
//!   producing undefined geometry.

use thiserror::Error;

/// Errors returned by the rendering core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Coordinate count is not a multiple of the buffer dimension.
    #[error("{len} coordinates cannot be split into points of dimension {dimension}")]
    DimensionMismatch { len: usize, dimension: usize },

    /// Per-point color list does not hold exactly one RGB triple per point.
    #[error("expected {expected} color components for {points} points, got {got}")]
    ColorCountMismatch {
        points: usize,
        expected: usize,
        got: usize,
    },

    /// A single appended point has the wrong number of components.
    #[error("point has {got} components, buffer dimension is {dimension}")]
    PointArity { got: usize, dimension: usize },

    /// `pop_matrix` was called on the base frame.
    #[error("transform stack underflow: cannot pop the base matrix")]
    StackUnderflow,

    /// The device refused (or cannot hold) a GPU allocation.
    #[error("GPU allocation refused for {label}: {size} bytes exceeds device limit of {limit} bytes")]
    Allocation {
        label: &'static str,
        size: u64,
        limit: u64,
    },

    /// The shader pipeline failed to compile or validate.
    #[error("shader pipeline failed: {0}")]
    Shader(String),

    /// Surface size or aspect ratio cannot produce a projection.
    #[error("invalid surface: {0}")]
    InvalidSurface(String),
}

/// Result alias used across the rendering core.
pub type Result<T> = std::result::Result<T, EngineError>;
