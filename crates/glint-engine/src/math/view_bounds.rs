use glam::{Mat4, Vec2, Vec4};

use crate::error::{EngineError, Result};

/// Visible rectangle of the virtual 2D space.
///
/// Virtual space is centered on the origin with +Y up, independent of the
/// surface resolution.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl ViewBounds {
    #[inline]
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Square bounds of side `view_size` centered on the origin.
    #[inline]
    pub fn square(view_size: f32) -> Self {
        let h = view_size / 2.0;
        Self::new(-h, h, -h, h)
    }

    /// Fits `view_size` to a surface aspect ratio (`width / height`).
    ///
    /// The shorter surface dimension always spans exactly `view_size`; the
    /// longer one is stretched by the aspect ratio so shapes keep their
    /// proportions.
    pub fn from_aspect(view_size: f32, aspect: f32) -> Result<Self> {
        if !(view_size.is_finite() && view_size > 0.0) {
            return Err(EngineError::InvalidSurface(format!(
                "view size must be positive and finite, got {view_size}"
            )));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(EngineError::InvalidSurface(format!(
                "aspect ratio must be positive and finite, got {aspect}"
            )));
        }

        let half = view_size / 2.0;
        let bounds = if aspect > 1.0 {
            Self::new(-half * aspect, half * aspect, -half, half)
        } else {
            Self::new(-half, half, -half / aspect, half / aspect)
        };
        Ok(bounds)
    }

    /// Same as [`from_aspect`](Self::from_aspect) from a surface size in pixels.
    pub fn from_surface(view_size: f32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidSurface(format!(
                "surface has zero size ({width}x{height})"
            )));
        }
        Self::from_aspect(view_size, width as f32 / height as f32)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// `(horizontal, vertical)` half extents.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width() / 2.0, self.height() / 2.0)
    }

    /// Orthographic projection onto wgpu clip space (depth range `0..1`).
    ///
    /// Geometry is expected on the `z = 0` plane; `-1..1` is kept visible so
    /// 3D coordinates with small depth offsets are not clipped.
    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(self.left, self.right, self.bottom, self.top, -1.0, 1.0)
    }

    /// Maps a cursor position (origin top-left, +Y down) on a surface of
    /// `surface_size` to virtual-space coordinates.
    pub fn screen_to_world(&self, cursor: Vec2, surface_size: Vec2) -> Vec2 {
        let size = surface_size.max(Vec2::ONE);
        let u = cursor.x / size.x;
        let v = cursor.y / size.y;
        Vec2::new(
            self.left + u * self.width(),
            self.top - v * self.height(),
        )
    }

    /// Maps a virtual-space point to normalized device coordinates.
    pub fn world_to_ndc(&self, p: Vec2) -> Vec2 {
        let clip = self.projection() * Vec4::new(p.x, p.y, 0.0, 1.0);
        Vec2::new(clip.x, clip.y) / clip.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn landscape_widens_horizontal_extent() {
        let b = ViewBounds::from_aspect(6.0, 2.0).unwrap();
        assert_eq!(b, ViewBounds::new(-6.0, 6.0, -3.0, 3.0));
        assert_eq!(b.half_extents(), Vec2::new(6.0, 3.0));
    }

    #[test]
    fn portrait_stretches_vertical_extent() {
        let b = ViewBounds::from_aspect(6.0, 0.5).unwrap();
        assert_eq!(b, ViewBounds::new(-3.0, 3.0, -6.0, 6.0));
        assert_eq!(b.half_extents(), Vec2::new(3.0, 6.0));
    }

    #[test]
    fn square_surface_matches_view_size() {
        let b = ViewBounds::from_surface(1.0, 800, 800).unwrap();
        assert_eq!(b, ViewBounds::square(1.0));
    }

    #[test]
    fn invalid_aspect_is_rejected() {
        assert!(ViewBounds::from_aspect(6.0, 0.0).is_err());
        assert!(ViewBounds::from_aspect(6.0, f32::NAN).is_err());
        assert!(ViewBounds::from_aspect(-1.0, 1.0).is_err());
        assert!(ViewBounds::from_surface(6.0, 0, 600).is_err());
    }

    #[test]
    fn projection_maps_bounds_to_ndc_corners() {
        let b = ViewBounds::from_aspect(6.0, 2.0).unwrap();
        let tr = b.world_to_ndc(Vec2::new(6.0, 3.0));
        let bl = b.world_to_ndc(Vec2::new(-6.0, -3.0));
        assert!(close(tr.x, 1.0) && close(tr.y, 1.0), "got {tr:?}");
        assert!(close(bl.x, -1.0) && close(bl.y, -1.0), "got {bl:?}");
    }

    #[test]
    fn screen_to_world_flips_y() {
        let b = ViewBounds::square(1.0);
        let size = Vec2::new(800.0, 800.0);
        let top_left = b.screen_to_world(Vec2::ZERO, size);
        let center = b.screen_to_world(Vec2::new(400.0, 400.0), size);
        let bottom_right = b.screen_to_world(size, size);
        assert_eq!(top_left, Vec2::new(-0.5, 0.5));
        assert_eq!(center, Vec2::ZERO);
        assert_eq!(bottom_right, Vec2::new(0.5, -0.5));
    }

    #[test]
    fn screen_to_world_uses_landscape_extent() {
        let b = ViewBounds::from_surface(1.0, 1600, 800).unwrap();
        let p = b.screen_to_world(Vec2::new(1600.0, 0.0), Vec2::new(1600.0, 800.0));
        assert!(close(p.x, 1.0) && close(p.y, 0.5), "got {p:?}");
    }
}
