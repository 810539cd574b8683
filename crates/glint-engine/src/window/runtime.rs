use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, EventCtx, FrameCtx, SetupCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::paint::Rgb;
use crate::render::{Engine, EngineConfig};
use crate::time::{FrameClock, FramePacer};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Frames per second; 0 redraws as fast as the surface presents.
    pub target_fps: u32,
    /// Color every `FrameCtx::begin_frame` clears to.
    pub clear_color: Rgb,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            initial_size: LogicalSize::new(800.0, 800.0),
            target_fps: 30,
            clear_color: Rgb::BLACK,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, creates the GPU context and the [`Engine`], runs
    /// `App::setup`, then drives the app until it exits or the window closes.
    ///
    /// Failing to create the window, GPU or engine, or a failed setup, ends
    /// the loop and is returned as the error.
    pub fn run<A>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        engine_config: EngineConfig,
        app: A,
    ) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            gpu_init,
            engine_config,
            app,
            session: None,
            fatal: None,
            exit_requested: false,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Everything that exists once the window is up.
struct Session {
    entry: WindowEntry,
    engine: Engine,
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    pacer: FramePacer,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    engine_config: EngineConfig,
    app: A,

    session: Option<Session>,
    fatal: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn create_session(&mut self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()?;

        let engine_config = self.engine_config.clone();
        let app = &mut self.app;
        let engine = entry.with_gpu(|gpu| -> Result<Engine> {
            let size = gpu.size();
            let rctx = gpu.render_ctx();
            let mut engine = Engine::new(&rctx, engine_config, size.width, size.height)
                .context("failed to create rendering engine")?;

            app.setup(&mut SetupCtx {
                render: rctx,
                engine: &mut engine,
            })
            .context("application setup failed")?;

            Ok(engine)
        })?;

        log::info!("runtime started at {} fps", self.config.target_fps);

        Ok(Session {
            entry,
            engine,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            pacer: FramePacer::new(self.config.target_fps),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        match self.create_session(event_loop) {
            Ok(session) => {
                session.entry.borrow_window().request_redraw();
                self.session = Some(session);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(session) = self.session.as_ref() else {
            return;
        };

        match session.pacer.next_deadline() {
            Some(deadline) if Instant::now() < deadline => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {
                event_loop.set_control_flow(ControlFlow::Wait);
                session.entry.borrow_window().request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let clear_color = self.config.clear_color;
        let app = &mut self.app;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Session {
            entry,
            engine,
            input_state,
            input_frame,
            clock,
            pacer,
        } = session;

        let mut control = AppControl::Continue;

        if let Some(ev) = translate_window_event(input_state, &event) {
            input_state.apply_event(input_frame, ev.clone());

            control = entry.with_gpu(|gpu| {
                let size = gpu.size();
                let mut ctx = EventCtx {
                    render: gpu.render_ctx(),
                    engine: &mut *engine,
                    input: &*input_state,
                    surface_size: (size.width, size.height),
                };
                app.on_input(&ev, &mut ctx)
            });
        }

        match &event {
            WindowEvent::CloseRequested => control = AppControl::Exit,

            WindowEvent::Resized(new_size) => {
                resize(entry, engine, *new_size);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.borrow_window().inner_size();
                resize(entry, engine, new_size);
            }

            WindowEvent::RedrawRequested if control == AppControl::Continue => {
                let time = clock.tick();

                control = entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: fields.window,
                        gpu: fields.gpu,
                        engine: &mut *engine,
                        input: &*input_state,
                        input_frame: &*input_frame,
                        time,
                        clear_color,
                    };
                    app.on_frame(&mut ctx)
                });

                input_frame.clear();
                pacer.frame_presented(Instant::now());
            }

            _ => {}
        }

        if control == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // GPU resources go before the window they render to.
        self.session = None;
    }
}

fn resize(entry: &mut WindowEntry, engine: &mut Engine, new_size: PhysicalSize<u32>) {
    entry.with_gpu_mut(|gpu| gpu.resize(new_size));

    if new_size.width > 0 && new_size.height > 0 {
        if let Err(e) = engine.resize(new_size.width, new_size.height) {
            log::warn!("projection not updated: {e}");
        }
        log::debug!("resized to {}x{}", new_size.width, new_size.height);
    }

    entry.borrow_window().request_redraw();
}
