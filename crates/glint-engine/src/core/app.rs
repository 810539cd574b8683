use crate::input::InputEvent;

use super::ctx::{EventCtx, FrameCtx, SetupCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
///
/// Call order: `setup` once after the GPU and engine exist, then any number of
/// `on_input` calls between `on_frame` calls.
pub trait App {
    /// One-time initialization: create and upload shapes here.
    ///
    /// An error ends the runtime.
    fn setup(&mut self, ctx: &mut SetupCtx<'_>) -> anyhow::Result<()>;

    /// Called for each translated input event.
    fn on_input(&mut self, event: &InputEvent, ctx: &mut EventCtx<'_>) -> AppControl {
        let _ = (event, ctx);
        AppControl::Continue
    }

    /// Called once per paced frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
