//! Click to place points; `P`/`L` switch between points and a closed line
//! loop, `A` toggles the axes, `Q` or Escape quits.

use glint_engine::input::{InputEvent, Key, MouseButton};
use glint_engine::{
    App, AppControl, Dimension, EventCtx, FrameCtx, PointSet, PrimitiveType, Rgb, SetupCtx,
    TransformStack,
};
use glint_exercises::Axes;

/// Diameter of the placed points, in pixels.
const POINT_SIZE: f32 = 6.0;

struct Points {
    axes: Axes,
    points: PointSet,
    show_axes: bool,
}

impl App for Points {
    fn setup(&mut self, ctx: &mut SetupCtx<'_>) -> anyhow::Result<()> {
        self.axes.init(&ctx.render)?;
        self.points.init_set(&ctx.render, &[], &[])?;
        ctx.engine.set_point_size(POINT_SIZE);
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent, ctx: &mut EventCtx<'_>) -> AppControl {
        if let Some(pos) = event.button_press(MouseButton::Left) {
            let p = ctx.cursor_to_world(pos);
            match self.points.append(&ctx.render, &[p.x, p.y], Rgb::WHITE) {
                Ok(()) => {
                    let n = self.points.point_count();
                    log::info!("point {n} at ({:.2}, {:.2})", p.x, p.y);
                }
                Err(e) => log::warn!("point not added: {e}"),
            }
        }

        if event.is_key_press(Key::P) {
            self.points.change_primitive_type(PrimitiveType::Points);
        } else if event.is_key_press(Key::L) {
            self.points.change_primitive_type(PrimitiveType::LineLoop);
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

        frame.sync_transform(&TransformStack::new());
        frame.draw(&self.points);

        ctx.present(frame)
    }
}

fn main() -> anyhow::Result<()> {
    let app = Points {
        axes: Axes::new(),
        points: PointSet::new(Dimension::Two),
        show_axes: true,
    };
    glint_exercises::run("glint: points", Rgb::gray(0.1), app)
}
