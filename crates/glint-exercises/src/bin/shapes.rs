//! One shape at a time: `Space` cycles square, triangle and disc, `F`
//! switches between filled and outlined, `A` toggles the axes.

use glint_engine::input::{InputEvent, Key};
use glint_engine::{
    circle_outline, square_outline, triangle_outline, App, AppControl, ConvexShape, Dimension,
    EventCtx, FrameCtx, PrimitiveType, Rgb, SetupCtx, TransformStack,
};
use glint_exercises::Axes;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Current {
    Square,
    Triangle,
    Disc,
}

impl Current {
    fn next(self) -> Self {
        match self {
            Current::Square => Current::Triangle,
            Current::Triangle => Current::Disc,
            Current::Disc => Current::Square,
        }
    }
}

struct Shapes {
    axes: Axes,
    square: ConvexShape,
    triangle: ConvexShape,
    disc: ConvexShape,
    current: Current,
    filled: bool,
    show_axes: bool,
}

impl Shapes {
    fn apply_fill(&mut self) {
        let primitive = if self.filled {
            PrimitiveType::TriangleFan
        } else {
            PrimitiveType::LineLoop
        };
        for shape in [&mut self.square, &mut self.triangle, &mut self.disc] {
            shape.change_primitive_type(primitive);
        }
    }

    fn shown(&self) -> (&ConvexShape, Rgb) {
        match self.current {
            Current::Square => (&self.square, Rgb::new(0.9, 0.4, 0.1)),
            Current::Triangle => (&self.triangle, Rgb::new(0.2, 0.7, 0.3)),
            Current::Disc => (&self.disc, Rgb::new(0.2, 0.4, 0.9)),
        }
    }
}

impl App for Shapes {
    fn setup(&mut self, ctx: &mut SetupCtx<'_>) -> anyhow::Result<()> {
        self.axes.init(&ctx.render)?;
        self.square.initialize(&ctx.render, &square_outline(2.0))?;
        self.triangle.initialize(&ctx.render, &triangle_outline(2.0, 2.0))?;
        self.disc.initialize(&ctx.render, &circle_outline(48, 1.0))?;
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent, _ctx: &mut EventCtx<'_>) -> AppControl {
        if event.is_key_press(Key::Space) {
            self.current = self.current.next();
            log::info!("showing {:?}", self.current);
        } else if event.is_key_press(Key::F) {
            self.filled = !self.filled;
            self.apply_fill();
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

        let (shape, color) = self.shown();
        frame.draw_with(shape, color, &TransformStack::new());

        ctx.present(frame)
    }
}

fn main() -> anyhow::Result<()> {
    let app = Shapes {
        axes: Axes::new(),
        square: ConvexShape::new(Dimension::Two),
        triangle: ConvexShape::new(Dimension::Two),
        disc: ConvexShape::new(Dimension::Two),
        current: Current::Square,
        filled: true,
        show_axes: true,
    };
    glint_exercises::run("glint: shapes", Rgb::BLACK, app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_cycles_through_all_three_shapes() {
        let start = Current::Square;
        assert_eq!(start.next(), Current::Triangle);
        assert_eq!(start.next().next(), Current::Disc);
        assert_eq!(start.next().next().next(), start);
    }
}
