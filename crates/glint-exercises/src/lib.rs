//! Shared scaffolding for the exercise programs in `src/bin`.

use glint_engine::device::GpuInit;
use glint_engine::logging::{init_logging, LoggingConfig};
use glint_engine::render::RenderCtx;
use glint_engine::window::{Runtime, RuntimeConfig};
use glint_engine::{
    App, Dimension, EngineConfig, Frame, PointSet, PrimitiveType, Rgb, TransformStack,
};

/// Extent of the shorter window side in virtual units.
pub const VIEW_SIZE: f32 = 6.0;

/// Initializes logging and runs `app` in an 800x800 window at 30 fps.
pub fn run<A: App + 'static>(title: &str, clear_color: Rgb, app: A) -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: title.to_string(),
        clear_color,
        ..RuntimeConfig::default()
    };
    let engine = EngineConfig {
        view_size: VIEW_SIZE,
        ..EngineConfig::default()
    };

    Runtime::run(config, GpuInit::default(), engine, app)
}

/// Red X axis and green Y axis from the origin.
pub struct Axes {
    lines: PointSet,
}

impl Axes {
    pub fn new() -> Self {
        let mut lines = PointSet::new(Dimension::Two);
        lines.change_primitive_type(PrimitiveType::Lines);
        Self { lines }
    }

    pub fn init(&mut self, ctx: &RenderCtx<'_>) -> glint_engine::Result<()> {
        let half = VIEW_SIZE / 2.0;
        let coordinates = [0.0, 0.0, half, 0.0, 0.0, 0.0, 0.0, half];
        let colors = [
            1.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 1.0, 0.0,
        ];
        self.lines.init_set(ctx, &coordinates, &colors)
    }

    /// Records the axes untransformed.
    pub fn draw<'a>(&'a self, frame: &mut Frame<'a>) {
        frame.sync_transform(&TransformStack::new());
        frame.draw(&self.lines);
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}
