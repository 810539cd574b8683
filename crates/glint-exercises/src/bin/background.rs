//! Four colored points over a background picked by clicking: the cursor
//! position sets red (`x mod 256`) and green (`y mod 256`). `Q` or Escape
//! quits.

use glint_engine::input::{CursorPos, InputEvent, Key, MouseButton};
use glint_engine::{
    App, AppControl, Dimension, EventCtx, FrameCtx, PointSet, Rgb, SetupCtx, TransformStack,
};

struct Background {
    points: PointSet,
    color: Rgb,
}

/// Background color for a click at `pos` (physical pixels).
fn color_at(pos: CursorPos) -> Rgb {
    let channel = |v: f32| (v.max(0.0) as u32 % 256) as u8;
    Rgb::from_u8(channel(pos.x), channel(pos.y), 0)
}

impl App for Background {
    fn setup(&mut self, ctx: &mut SetupCtx<'_>) -> anyhow::Result<()> {
        let coordinates = [0.0, 0.0, 1.5, 0.0, 0.0, 1.5, -1.5, -1.5];
        let colors = [
            1.0, 1.0, 1.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            1.0, 0.0, 1.0,
        ];
        self.points.init_set(&ctx.render, &coordinates, &colors)?;
        ctx.engine.set_point_size(8.0);
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent, _ctx: &mut EventCtx<'_>) -> AppControl {
        if let Some(pos) = event.button_press(MouseButton::Left) {
            self.color = color_at(pos);
            log::info!("click at ({:.0}, {:.0}): background {:?}", pos.x, pos.y, self.color);
        } else if event.is_key_press(Key::Q) || event.is_key_press(Key::Escape) {
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let mut frame = ctx.begin_frame();
        frame.clear(self.color);
        frame.sync_transform(&TransformStack::new());
        frame.draw(&self.points);
        ctx.present(frame)
    }
}

fn main() -> anyhow::Result<()> {
    let color = Rgb::new(0.2, 0.0, 0.0);
    let app = Background {
        points: PointSet::new(Dimension::Two),
        color,
    };
    glint_exercises::run("glint: background", color, app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_position_wraps_into_color_channels() {
        let c = color_at(CursorPos { x: 300.0, y: 255.0 });
        assert_eq!(c, Rgb::from_u8(44, 255, 0));
        assert_eq!(color_at(CursorPos { x: 0.0, y: 0.0 }), Rgb::BLACK);
    }
}
