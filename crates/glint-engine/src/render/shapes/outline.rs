//! Counter-clockwise 2D outlines centered on the origin.

use std::f32::consts::TAU;

/// Regular polygon approximating a circle; `segments` is clamped to at least 3.
pub fn circle_outline(segments: u32, radius: f32) -> Vec<f32> {
    let segments = segments.max(3);
    (0..segments)
        .flat_map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect()
}

pub fn rect_outline(width: f32, height: f32) -> Vec<f32> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    vec![-hw, -hh, hw, -hh, hw, hh, -hw, hh]
}

pub fn square_outline(side: f32) -> Vec<f32> {
    rect_outline(side, side)
}

/// Isosceles triangle with its base at the bottom of the bounding box.
pub fn triangle_outline(width: f32, height: f32) -> Vec<f32> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    vec![-hw, -hh, hw, -hh, 0.0, hh]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_points_lie_on_radius() {
        let c = circle_outline(32, 0.5);
        assert_eq!(c.len(), 64);
        for p in c.chunks_exact(2) {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!((r - 0.5).abs() < 1e-6);
        }
        assert_eq!(&c[..2], &[0.5, 0.0]);
    }

    #[test]
    fn circle_needs_three_segments() {
        assert_eq!(circle_outline(1, 1.0).len(), 6);
    }

    #[test]
    fn square_corners() {
        assert_eq!(
            square_outline(1.0),
            vec![-0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, 0.5]
        );
    }
}
