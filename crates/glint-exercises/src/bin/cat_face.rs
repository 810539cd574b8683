//! A cat face built from one disc and one triangle, reused through the
//! transform stack. `E` toggles the eyes, `A` the axes.

use std::f32::consts::PI;

use glint_engine::input::{InputEvent, Key};
use glint_engine::{
    circle_outline, triangle_outline, App, AppControl, ConvexShape, Dimension, EventCtx, Frame,
    FrameCtx, Rgb, SetupCtx, TransformStack, Vec3,
};
use glint_exercises::Axes;

const FUR: Rgb = Rgb::new(0.85, 0.55, 0.2);
const EAR: Rgb = Rgb::new(0.75, 0.45, 0.15);
const EYE: Rgb = Rgb::new(0.1, 0.6, 0.2);

struct CatFace {
    axes: Axes,
    disc: ConvexShape,
    triangle: ConvexShape,
    show_eyes: bool,
    show_axes: bool,
}

impl CatFace {
    fn draw_face<'a>(
        &'a self,
        frame: &mut Frame<'a>,
        stack: &mut TransformStack,
    ) -> glint_engine::Result<()> {
        // Head: unit disc scaled to diameter 2.
        stack.push_matrix();
        stack.add_homothety(Vec3::new(2.0, 2.0, 1.0));
        frame.draw_with(&self.disc, FUR, stack);
        stack.pop_matrix()?;

        for side in [-1.0f32, 1.0] {
            stack.push_matrix();
            stack.add_translation(Vec3::new(0.6 * side, 0.9, 0.0));
            stack.add_rotation(-side * PI / 8.0, Vec3::Z);
            stack.add_homothety(Vec3::new(0.6, 0.8, 1.0));
            frame.draw_with(&self.triangle, EAR, stack);
            stack.pop_matrix()?;
        }

        if self.show_eyes {
            for side in [-1.0f32, 1.0] {
                stack.push_matrix();
                stack.add_translation(Vec3::new(0.4 * side, 0.2, 0.0));
                stack.add_homothety(Vec3::new(0.25, 0.35, 1.0));
                frame.draw_with(&self.disc, EYE, stack);
                stack.pop_matrix()?;
            }
        }

        // Nose.
        stack.push_matrix();
        stack.add_translation(Vec3::new(0.0, -0.2, 0.0));
        stack.add_rotation(PI, Vec3::Z);
        stack.add_homothety(Vec3::new(0.2, 0.15, 1.0));
        frame.draw_with(&self.triangle, Rgb::new(0.9, 0.5, 0.6), stack);
        stack.pop_matrix()
    }
}

impl App for CatFace {
    fn setup(&mut self, ctx: &mut SetupCtx<'_>) -> anyhow::Result<()> {
        self.axes.init(&ctx.render)?;
        self.disc.initialize(&ctx.render, &circle_outline(32, 0.5))?;
        self.triangle.initialize(&ctx.render, &triangle_outline(1.0, 1.0))?;
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent, _ctx: &mut EventCtx<'_>) -> AppControl {
        if event.is_key_press(Key::E) {
            self.show_eyes = !self.show_eyes;
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

        let mut stack = TransformStack::new();
        if let Err(e) = self.draw_face(&mut frame, &mut stack) {
            log::error!("unbalanced transform stack: {e}");
            return AppControl::Exit;
        }

        ctx.present(frame)
    }
}

fn main() -> anyhow::Result<()> {
    let app = CatFace {
        axes: Axes::new(),
        disc: ConvexShape::new(Dimension::Two),
        triangle: ConvexShape::new(Dimension::Two),
        show_eyes: true,
        show_axes: true,
    };
    glint_exercises::run("glint: cat face", Rgb::new(0.2, 0.0, 0.0), app)
}
