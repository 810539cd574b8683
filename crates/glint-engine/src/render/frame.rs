use crate::math::TransformStack;
use crate::paint::Rgb;

use super::common::DrawUniforms;
use super::geometry::GeometryBuffer;
use super::primitive::{DrawPattern, FillMode, Topology};
use super::shapes::Shape;
use super::state::{DrawState, StateChanges};

/// One recorded draw: which vertices, how they are assembled, and the
/// uniforms that were current when it was recorded.
#[derive(Debug)]
pub struct DrawCall<'a> {
    pub(crate) geometry: &'a GeometryBuffer,
    pub pattern: DrawPattern,
    pub uniforms: DrawUniforms,
}

/// Draws recorded for one frame.
///
/// A frame starts from a copy of the engine state. Color and transform
/// changes apply to the draws recorded after them, in call order; nothing is
/// sent to the GPU until `Engine::submit`.
///
/// Engine setters called while a frame is open take effect from the next
/// frame. On submit, only what the frame itself changed is kept by the
/// engine.
#[derive(Debug)]
pub struct Frame<'a> {
    state: DrawState,
    changes: StateChanges,
    clear: Option<Rgb>,
    calls: Vec<DrawCall<'a>>,
}

impl<'a> Frame<'a> {
    pub fn new(state: DrawState) -> Self {
        Self {
            state,
            changes: StateChanges::default(),
            clear: None,
            calls: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Color used by flat-shaded draws recorded from now on.
    #[inline]
    pub fn set_flat_color(&mut self, color: Rgb) {
        self.state.flat_color = color;
        self.changes.flat_color = Some(color);
    }

    #[inline]
    pub fn flat_color(&self) -> Rgb {
        self.state.flat_color
    }

    /// Copies the current top of `stack` as the model-view transform.
    ///
    /// Must be called after mutating the stack and before the draw that
    /// should see the change; earlier draws keep the transform they recorded.
    #[inline]
    pub fn sync_transform(&mut self, stack: &TransformStack) {
        self.state.model_view = stack.current();
        self.changes.model_view = Some(self.state.model_view);
    }

    #[inline]
    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.state.fill_mode = mode;
        self.changes.fill_mode = Some(mode);
    }

    /// Point diameter in pixels for point draws recorded from now on.
    ///
    /// Sizes of one pixel or less use the native point primitive.
    #[inline]
    pub fn set_point_size(&mut self, size: f32) {
        self.state.point_size = size;
        self.changes.point_size = Some(size);
    }

    /// Clears the target to `color` before any draw of this frame.
    #[inline]
    pub fn clear(&mut self, color: Rgb) {
        self.clear = Some(color);
    }

    #[inline]
    pub fn clear_color(&self) -> Option<Rgb> {
        self.clear
    }

    /// Records `shape` with the current color and transform.
    pub fn draw<S: Shape + ?Sized>(&mut self, shape: &'a S) {
        let geometry = shape.geometry();
        let mut pattern = DrawPattern::resolve(
            geometry.primitive_type(),
            geometry.point_count() as u32,
            self.state.fill_mode,
        );
        if pattern.topology == Topology::PointList && self.state.wide_points() {
            pattern.topology = Topology::PointSprites;
        }
        let uniforms = self.state.uniforms(shape.shading());

        self.calls.push(DrawCall {
            geometry,
            pattern,
            uniforms,
        });
    }

    /// Sets the flat color, syncs `stack`, then records `shape`.
    ///
    /// Preferred form: color and transform cannot be forgotten or stale.
    pub fn draw_with<S: Shape + ?Sized>(
        &mut self,
        shape: &'a S,
        color: Rgb,
        stack: &TransformStack,
    ) {
        self.set_flat_color(color);
        self.sync_transform(stack);
        self.draw(shape);
    }

    #[inline]
    pub fn calls(&self) -> &[DrawCall<'a>] {
        &self.calls
    }

    pub(crate) fn into_parts(self) -> (StateChanges, Option<Rgb>, Vec<DrawCall<'a>>) {
        (self.changes, self.clear, self.calls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ViewBounds;
    use crate::render::geometry::Dimension;
    use crate::render::primitive::{DrawIndices, PrimitiveType, Topology};
    use crate::render::shapes::{square_outline, ConvexShape, PointSet};
    use glam::{Mat4, Vec3, Vec4};

    fn unit_square() -> ConvexShape {
        let mut shape = ConvexShape::new(Dimension::Two);
        shape.stage(square_outline(1.0)).unwrap();
        shape
    }

    #[test]
    fn red_quad_fixture() {
        let bounds = ViewBounds::square(2.0);
        let square = unit_square();
        let stack = TransformStack::new();

        let mut frame = Frame::new(DrawState {
            projection: bounds.projection(),
            ..DrawState::default()
        });
        frame.draw_with(&square, Rgb::RED, &stack);

        let [call] = frame.calls() else {
            panic!("expected one draw call");
        };
        assert_eq!(call.uniforms.flat_color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(call.uniforms.vertex_color, 0);
        assert_eq!(call.pattern.topology, Topology::TriangleList);
        assert_eq!(call.pattern.indices, DrawIndices::Indexed(vec![0, 1, 2, 0, 2, 3]));

        // Corners land at ±0.5 in NDC for a 2-unit view.
        let proj = Mat4::from_cols_array_2d(&call.uniforms.projection);
        let mv = Mat4::from_cols_array_2d(&call.uniforms.model_view);
        let coords = call.geometry.coordinates();
        for p in coords.chunks_exact(2) {
            let clip = proj * mv * Vec4::new(p[0], p[1], 0.0, 1.0);
            assert!((clip.x.abs() - 0.5).abs() < 1e-6, "x = {}", clip.x);
            assert!((clip.y.abs() - 0.5).abs() < 1e-6, "y = {}", clip.y);
        }
    }

    #[test]
    fn each_draw_snapshots_its_own_state() {
        let square = unit_square();
        let mut stack = TransformStack::new();
        let mut frame = Frame::new(DrawState::default());

        frame.set_flat_color(Rgb::RED);
        frame.sync_transform(&stack);
        frame.draw(&square);

        stack.add_translation(Vec3::new(1.0, 0.0, 0.0));
        frame.set_flat_color(Rgb::GREEN);
        // Transform not synced yet: this draw still sees the identity.
        frame.draw(&square);

        frame.sync_transform(&stack);
        frame.draw(&square);

        let calls = frame.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].uniforms.flat_color, Rgb::RED.to_rgba());
        assert_eq!(calls[1].uniforms.flat_color, Rgb::GREEN.to_rgba());
        assert_eq!(calls[1].uniforms.model_view, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(calls[2].uniforms.model_view[3], [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn point_set_draws_per_vertex() {
        let mut set = PointSet::new(Dimension::Two);
        set.stage(vec![0.0, 0.0, 1.0, 0.0], vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
            .unwrap();

        let mut frame = Frame::new(DrawState::default());
        frame.draw(&set);
        assert_eq!(frame.calls()[0].uniforms.vertex_color, 1);
        assert_eq!(frame.calls()[0].pattern.indices, DrawIndices::Sequential(2));
    }

    #[test]
    fn primitive_change_applies_to_next_record() {
        let mut square = unit_square();
        square.change_primitive_type(PrimitiveType::LineLoop);

        let mut frame = Frame::new(DrawState::default());
        frame.draw(&square);
        assert_eq!(frame.calls()[0].pattern.topology, Topology::LineStrip);
        assert_eq!(
            frame.calls()[0].pattern.indices,
            DrawIndices::Indexed(vec![0, 1, 2, 3, 0])
        );
    }

    #[test]
    fn wireframe_mode_outlines_fans() {
        let square = unit_square();
        let mut frame = Frame::new(DrawState::default());
        frame.set_fill_mode(FillMode::Wireframe);
        frame.draw(&square);
        assert_eq!(frame.calls()[0].pattern.topology, Topology::LineList);
    }

    #[test]
    fn into_parts_reports_only_what_the_frame_changed() {
        let mut frame = Frame::new(DrawState::default());
        frame.set_flat_color(Rgb::BLUE);
        frame.clear(Rgb::BLACK);
        let (changes, clear, calls) = frame.into_parts();
        assert_eq!(changes.flat_color, Some(Rgb::BLUE));
        assert_eq!(changes.model_view, None);
        assert_eq!(changes.fill_mode, None);
        assert_eq!(clear, Some(Rgb::BLACK));
        assert!(calls.is_empty());
    }

    #[test]
    fn untouched_frame_keeps_state_set_on_the_engine_meanwhile() {
        // Frame opened with the old projection and a white color.
        let frame = Frame::new(DrawState::default());

        // Meanwhile the engine was resized and recolored.
        let resized = ViewBounds::new(-6.0, 6.0, -3.0, 3.0).projection();
        let mut engine_state = DrawState {
            projection: resized,
            flat_color: Rgb::RED,
            ..DrawState::default()
        };

        let (changes, _, _) = frame.into_parts();
        changes.apply_to(&mut engine_state);
        assert_eq!(engine_state.projection, resized);
        assert_eq!(engine_state.flat_color, Rgb::RED);
    }

    #[test]
    fn wide_points_become_sprites() {
        let mut set = PointSet::new(Dimension::Two);
        set.stage(vec![0.0, 0.0, 1.0, 1.0], vec![1.0; 6]).unwrap();

        let mut frame = Frame::new(DrawState::default());
        frame.draw(&set);
        frame.set_point_size(6.0);
        frame.draw(&set);

        let calls = frame.calls();
        assert_eq!(calls[0].pattern.topology, Topology::PointList);
        assert_eq!(calls[0].uniforms.point_extent, [0.0, 0.0]);
        assert_eq!(calls[1].pattern.topology, Topology::PointSprites);
        assert_eq!(calls[1].pattern.indices, DrawIndices::Sequential(2));
        assert!(calls[1].uniforms.point_extent[0] > 0.0);
    }

    #[test]
    fn point_size_leaves_lines_alone() {
        let mut set = PointSet::new(Dimension::Two);
        set.stage(vec![0.0, 0.0, 1.0, 1.0], vec![1.0; 6]).unwrap();
        set.change_primitive_type(PrimitiveType::LineStrip);

        let mut frame = Frame::new(DrawState::default());
        frame.set_point_size(6.0);
        frame.draw(&set);
        assert_eq!(frame.calls()[0].pattern.topology, Topology::LineStrip);
    }
}
