use glam::{Mat4, Vec2};

use crate::paint::Rgb;

use super::common::DrawUniforms;
use super::primitive::FillMode;
use super::shapes::Shading;

/// Engine state observed by draws.
///
/// Snapshotted into a [`DrawUniforms`] block each time a draw is recorded.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawState {
    pub projection: Mat4,
    pub model_view: Mat4,
    pub flat_color: Rgb,
    pub fill_mode: FillMode,
    /// Point diameter in pixels.
    pub point_size: f32,
    /// Render target size in pixels; converts `point_size` to NDC.
    pub surface_size: Vec2,
}

impl DrawState {
    /// Whether points need sprites instead of the native 1 px primitive.
    #[inline]
    pub fn wide_points(&self) -> bool {
        self.point_size > 1.0
    }

    pub fn uniforms(&self, shading: Shading) -> DrawUniforms {
        let point_extent = if self.wide_points() {
            (Vec2::splat(self.point_size) / self.surface_size.max(Vec2::ONE)).to_array()
        } else {
            [0.0; 2]
        };

        DrawUniforms {
            projection: self.projection.to_cols_array_2d(),
            model_view: self.model_view.to_cols_array_2d(),
            flat_color: self.flat_color.to_rgba(),
            vertex_color: match shading {
                Shading::Flat => 0,
                Shading::PerVertex => 1,
            },
            _pad: 0,
            point_extent,
        }
    }
}

/// State a frame changed while recording.
///
/// Written back into the engine on submit. The projection is never part of
/// it: that belongs to the engine and follows the surface.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub(crate) struct StateChanges {
    pub flat_color: Option<Rgb>,
    pub model_view: Option<Mat4>,
    pub fill_mode: Option<FillMode>,
    pub point_size: Option<f32>,
}

impl StateChanges {
    pub(crate) fn apply_to(&self, state: &mut DrawState) {
        if let Some(color) = self.flat_color {
            state.flat_color = color;
        }
        if let Some(model_view) = self.model_view {
            state.model_view = model_view;
        }
        if let Some(mode) = self.fill_mode {
            state.fill_mode = mode;
        }
        if let Some(size) = self.point_size {
            state.point_size = size;
        }
    }
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            model_view: Mat4::IDENTITY,
            flat_color: Rgb::WHITE,
            fill_mode: FillMode::Fill,
            point_size: 1.0,
            surface_size: Vec2::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn uniforms_carry_matrices_column_major() {
        let state = DrawState {
            model_view: Mat4::from_translation(Vec3::new(1.0, 2.0, 0.0)),
            ..DrawState::default()
        };
        let u = state.uniforms(Shading::Flat);
        assert_eq!(u.model_view[3], [1.0, 2.0, 0.0, 1.0]);
        assert_eq!(u.projection, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn shading_selects_color_source() {
        let state = DrawState {
            flat_color: Rgb::RED,
            ..DrawState::default()
        };
        let flat = state.uniforms(Shading::Flat);
        let per_vertex = state.uniforms(Shading::PerVertex);
        assert_eq!(flat.flat_color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(flat.vertex_color, 0);
        assert_eq!(per_vertex.vertex_color, 1);
    }

    #[test]
    fn changes_leave_projection_and_untouched_fields_alone() {
        let resized = Mat4::orthographic_rh(-6.0, 6.0, -3.0, 3.0, -1.0, 1.0);
        let mut engine_state = DrawState {
            projection: resized,
            flat_color: Rgb::RED,
            ..DrawState::default()
        };

        let changes = StateChanges {
            fill_mode: Some(FillMode::Wireframe),
            ..StateChanges::default()
        };
        changes.apply_to(&mut engine_state);

        assert_eq!(engine_state.projection, resized);
        assert_eq!(engine_state.flat_color, Rgb::RED);
        assert_eq!(engine_state.fill_mode, FillMode::Wireframe);
    }

    #[test]
    fn changes_overwrite_what_they_carry() {
        let mut engine_state = DrawState::default();
        let moved = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        StateChanges {
            flat_color: Some(Rgb::GREEN),
            model_view: Some(moved),
            ..StateChanges::default()
        }
        .apply_to(&mut engine_state);

        assert_eq!(engine_state.flat_color, Rgb::GREEN);
        assert_eq!(engine_state.model_view, moved);
        assert_eq!(engine_state.fill_mode, FillMode::Fill);
        assert_eq!(engine_state.projection, Mat4::IDENTITY);
    }

    #[test]
    fn point_extent_is_half_the_size_in_ndc() {
        let state = DrawState {
            point_size: 6.0,
            surface_size: Vec2::new(600.0, 300.0),
            ..DrawState::default()
        };
        assert!(state.wide_points());
        // 3 px half size over a 600 x 300 target spanning 2 NDC units.
        assert_eq!(state.uniforms(Shading::Flat).point_extent, [0.01, 0.02]);

        let native = DrawState::default();
        assert!(!native.wide_points());
        assert_eq!(native.uniforms(Shading::Flat).point_extent, [0.0, 0.0]);
    }
}
