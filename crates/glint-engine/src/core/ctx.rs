use glam::Vec2;
use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{CursorPos, InputFrame, InputState};
use crate::math::ViewBounds;
use crate::paint::Rgb;
use crate::render::{Engine, Frame, RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::app::AppControl;

/// Context for `App::setup`.
pub struct SetupCtx<'a> {
    pub render: RenderCtx<'a>,
    pub engine: &'a mut Engine,
}

/// Context for `App::on_input`.
pub struct EventCtx<'a> {
    pub render: RenderCtx<'a>,
    pub engine: &'a mut Engine,
    pub input: &'a InputState,
    /// Surface size in physical pixels.
    pub surface_size: (u32, u32),
}

impl EventCtx<'_> {
    /// Maps a cursor position to virtual-space coordinates.
    pub fn cursor_to_world(&self, pos: CursorPos) -> Vec2 {
        let (w, h) = self.surface_size;
        self.engine
            .view_bounds()
            .screen_to_world(Vec2::new(pos.x, pos.y), Vec2::new(w as f32, h as f32))
    }
}

/// Per-frame context passed to `App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub engine: &'a mut Engine,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub clear_color: Rgb,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    #[inline]
    pub fn render_ctx(&self) -> RenderCtx<'_> {
        self.gpu.render_ctx()
    }

    #[inline]
    pub fn view_bounds(&self) -> ViewBounds {
        self.engine.view_bounds()
    }

    /// Starts a frame that clears to the runtime's clear color.
    pub fn begin_frame<'f>(&self) -> Frame<'f> {
        let mut frame = self.engine.begin_frame();
        frame.clear(self.clear_color);
        frame
    }

    /// Acquires the swapchain image, encodes `frame` into it and presents it.
    ///
    /// Surface errors skip the frame unless fatal; engine errors are fatal.
    pub fn present(&mut self, frame: Frame<'_>) -> AppControl {
        let mut gpu_frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("fatal surface error, stopping");
                        AppControl::Exit
                    }
                    _ => AppControl::Continue,
                };
            }
        };

        let rctx = self.gpu.render_ctx();
        let submitted = {
            let mut target = RenderTarget::new(&mut gpu_frame.encoder, &gpu_frame.view);
            self.engine.submit(&rctx, &mut target, frame)
        };

        if let Err(e) = submitted {
            log::error!("frame submission failed: {e}");
            return AppControl::Exit;
        }

        self.window.pre_present_notify();
        self.gpu.submit(gpu_frame);
        self.engine.queue_submitted();
        AppControl::Continue
    }
}
