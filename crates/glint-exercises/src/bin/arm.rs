//! Articulated arm: base, manipulator and beater, each drawn in the frame of
//! its parent. Joints swing over time. `F` shows wireframe, `P` filled, `A`
//! toggles the axes.

use glint_engine::input::{InputEvent, Key};
use glint_engine::{
    circle_outline, square_outline, App, AppControl, ConvexShape, Dimension, EventCtx, FillMode,
    Frame, FrameCtx, Rgb, SetupCtx, TransformStack, Vec3,
};
use glint_exercises::Axes;

const BASE_DISC: Rgb = Rgb::gray(0.7);
const BASE_BODY: Rgb = Rgb::gray(0.6);
const MANIPULATOR: Rgb = Rgb::new(0.6, 0.6, 0.8);
const MANIPULATOR_BAR: Rgb = Rgb::new(0.5, 0.5, 0.7);
const BEATER: Rgb = Rgb::new(0.8, 0.6, 0.6);
const BEATER_BAR: Rgb = Rgb::new(0.7, 0.5, 0.5);

type DrawResult = glint_engine::Result<()>;

struct Arm {
    axes: Axes,
    /// Unit disc (diameter 1).
    disc: ConvexShape,
    /// Unit square centered at the origin.
    square: ConvexShape,
    trapezoid: ConvexShape,
    show_axes: bool,
}

impl Arm {
    /// Large disc at the origin, trapezoid body, small disc on top at y = 2.
    fn draw_base<'a>(&'a self, frame: &mut Frame<'a>, stack: &mut TransformStack) -> DrawResult {
        stack.push_matrix();
        frame.draw_with(&self.disc, BASE_DISC, stack);

        stack.push_matrix();
        stack.add_translation(Vec3::new(0.0, 1.0, 0.0));
        frame.draw_with(&self.trapezoid, BASE_BODY, stack);
        stack.pop_matrix()?;

        stack.push_matrix();
        stack.add_translation(Vec3::new(0.0, 2.0, 0.0));
        stack.add_homothety(Vec3::new(0.5, 0.5, 1.0));
        frame.draw_with(&self.disc, BASE_DISC, stack);
        stack.pop_matrix()?;

        stack.pop_matrix()
    }

    /// Gray square of side 0.8 with rounded corners of radius 0.1.
    fn draw_rounded_square<'a>(
        &'a self,
        frame: &mut Frame<'a>,
        stack: &mut TransformStack,
        color: Rgb,
    ) -> DrawResult {
        stack.push_matrix();
        stack.add_homothety(Vec3::new(0.8, 0.6, 1.0));
        frame.draw_with(&self.square, color, stack);
        stack.pop_matrix()?;

        stack.push_matrix();
        stack.add_homothety(Vec3::new(0.6, 0.8, 1.0));
        frame.draw_with(&self.square, color, stack);
        stack.pop_matrix()?;

        for (x, y) in [(0.3, 0.3), (-0.3, 0.3), (0.3, -0.3), (-0.3, -0.3)] {
            stack.push_matrix();
            stack.add_translation(Vec3::new(x, y, 0.0));
            stack.add_homothety(Vec3::new(0.2, 0.2, 1.0));
            frame.draw_with(&self.disc, color, stack);
            stack.pop_matrix()?;
        }

        Ok(())
    }

    /// Rounded squares at x = 0 and x = 2 joined by a bar.
    fn draw_manipulator<'a>(
        &'a self,
        frame: &mut Frame<'a>,
        stack: &mut TransformStack,
    ) -> DrawResult {
        stack.push_matrix();
        self.draw_rounded_square(frame, stack, MANIPULATOR)?;

        stack.push_matrix();
        stack.add_translation(Vec3::new(1.0, 0.0, 0.0));
        stack.add_homothety(Vec3::new(1.2, 0.4, 1.0));
        frame.draw_with(&self.square, MANIPULATOR_BAR, stack);
        stack.pop_matrix()?;

        stack.push_matrix();
        stack.add_translation(Vec3::new(2.0, 0.0, 0.0));
        self.draw_rounded_square(frame, stack, MANIPULATOR)?;
        stack.pop_matrix()?;

        stack.pop_matrix()
    }

    /// Small square, short bar, disc head at x = 1.5.
    fn draw_beater<'a>(&'a self, frame: &mut Frame<'a>, stack: &mut TransformStack) -> DrawResult {
        stack.push_matrix();

        stack.push_matrix();
        stack.add_homothety(Vec3::new(0.4, 0.4, 1.0));
        frame.draw_with(&self.square, BEATER, stack);
        stack.pop_matrix()?;

        stack.push_matrix();
        stack.add_translation(Vec3::new(0.75, 0.0, 0.0));
        stack.add_homothety(Vec3::new(1.1, 0.2, 1.0));
        frame.draw_with(&self.square, BEATER_BAR, stack);
        stack.pop_matrix()?;

        stack.push_matrix();
        stack.add_translation(Vec3::new(1.5, 0.0, 0.0));
        stack.add_homothety(Vec3::new(0.6, 0.6, 1.0));
        frame.draw_with(&self.disc, BEATER, stack);
        stack.pop_matrix()?;

        stack.pop_matrix()
    }

    fn draw_arm<'a>(&'a self, frame: &mut Frame<'a>, elapsed: f32) -> DrawResult {
        let shoulder = 0.35 + 0.4 * (elapsed * 0.8).sin();
        let wrist = 0.8 * (elapsed * 1.7).sin();

        let mut stack = TransformStack::new();

        stack.push_matrix();
        stack.add_translation(Vec3::new(0.0, -1.0, 0.0));
        self.draw_base(frame, &mut stack)?;

        stack.push_matrix();
        stack.add_translation(Vec3::new(0.0, 2.0, 0.0));
        stack.add_rotation(shoulder, Vec3::Z);
        self.draw_manipulator(frame, &mut stack)?;

        stack.push_matrix();
        stack.add_translation(Vec3::new(2.0, 0.0, 0.0));
        stack.add_rotation(wrist, Vec3::Z);
        self.draw_beater(frame, &mut stack)?;
        stack.pop_matrix()?;

        stack.pop_matrix()?;
        stack.pop_matrix()
    }
}

impl App for Arm {
    fn setup(&mut self, ctx: &mut SetupCtx<'_>) -> anyhow::Result<()> {
        self.axes.init(&ctx.render)?;
        self.disc.initialize(&ctx.render, &circle_outline(32, 0.5))?;
        self.square.initialize(&ctx.render, &square_outline(1.0))?;
        self.trapezoid
            .initialize(&ctx.render, &[-0.5, -1.0, 0.5, -1.0, 0.25, 1.0, -0.25, 1.0])?;
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent, ctx: &mut EventCtx<'_>) -> AppControl {
        if event.is_key_press(Key::F) {
            ctx.engine.set_fill_mode(FillMode::Wireframe);
        } else if event.is_key_press(Key::P) {
            ctx.engine.set_fill_mode(FillMode::Fill);
        } else if event.is_key_press(Key::A) {
            self.show_axes = !self.show_axes;
        } else if event.is_key_press(Key::Q) || event.is_key_press(Key::Escape) {
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let mut frame = ctx.begin_frame();
        if self.show_axes {
            self.axes.draw(&mut frame);
        }

        if let Err(e) = self.draw_arm(&mut frame, ctx.time.elapsed) {
            log::error!("unbalanced transform stack: {e}");
            return AppControl::Exit;
        }

        ctx.present(frame)
    }
}

fn main() -> anyhow::Result<()> {
    let app = Arm {
        axes: Axes::new(),
        disc: ConvexShape::new(Dimension::Two),
        square: ConvexShape::new(Dimension::Two),
        trapezoid: ConvexShape::new(Dimension::Two),
        show_axes: true,
    };
    glint_exercises::run("glint: arm", Rgb::new(0.15, 0.15, 0.2), app)
}
