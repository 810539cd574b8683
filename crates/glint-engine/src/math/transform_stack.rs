use glam::{Mat4, Vec3};

use crate::error::{EngineError, Result};

/// Stack of composed model-view transforms.
///
/// The stack is never empty; the last entry is the current transform.
/// Composition calls right-multiply onto the top, so the last call issued acts
/// closest to the object's local geometry:
///
/// ```text
/// stack.add_translation(t);   // top = T
/// stack.add_rotation(a, z);   // top = T * R
/// stack.add_homothety(s);     // top = T * R * S  -> scale, then rotate, then translate
/// ```
#[derive(Debug, Clone)]
pub struct TransformStack {
    matrices: Vec<Mat4>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            matrices: vec![Mat4::IDENTITY],
        }
    }

    /// Resets the whole stack to a single identity entry.
    pub fn load_identity(&mut self) {
        self.matrices.clear();
        self.matrices.push(Mat4::IDENTITY);
    }

    /// Duplicates the current top. Later compositions only touch the copy.
    pub fn push_matrix(&mut self) {
        let top = self.current();
        self.matrices.push(top);
    }

    /// Restores the transform saved by the matching `push_matrix`.
    ///
    /// Popping the base entry is a caller error and leaves the stack untouched.
    pub fn pop_matrix(&mut self) -> Result<()> {
        if self.matrices.len() <= 1 {
            return Err(EngineError::StackUnderflow);
        }
        self.matrices.pop();
        Ok(())
    }

    pub fn add_translation(&mut self, v: Vec3) {
        self.compose(Mat4::from_translation(v));
    }

    /// Rotates by `radians` around `axis`.
    ///
    /// A zero-length axis has no direction; the call is ignored.
    pub fn add_rotation(&mut self, radians: f32, axis: Vec3) {
        let Some(axis) = axis.try_normalize() else {
            log::warn!("add_rotation: degenerate axis {axis:?}, rotation ignored");
            return;
        };
        self.compose(Mat4::from_axis_angle(axis, radians));
    }

    /// Non-uniform scale.
    pub fn add_homothety(&mut self, scale: Vec3) {
        self.compose(Mat4::from_scale(scale));
    }

    #[inline]
    pub fn current(&self) -> Mat4 {
        // Non-empty by construction.
        self.matrices.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Number of entries, base frame included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.matrices.len()
    }

    /// Applies the current transform to a point.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.current().transform_point3(p)
    }

    fn compose(&mut self, m: Mat4) {
        if let Some(top) = self.matrices.last_mut() {
            *top *= m;
        }
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
