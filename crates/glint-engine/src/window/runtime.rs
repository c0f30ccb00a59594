use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::render::RenderCtx;
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Top-left corner on the desktop; `None` lets the platform decide.
    pub position: Option<LogicalPosition<f64>>,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            position: None,
            initial_size: LogicalSize::new(1280.0, 720.0),
            resizable: true,
        }
    }
}

impl RuntimeConfig {
    fn window_attributes(&self) -> WindowAttributes {
        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size)
            .with_resizable(self.resizable);

        match self.position {
            Some(pos) => attrs.with_position(pos),
            None => attrs,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, drives `app` until it exits or the window closes,
    /// then tears everything down.
    ///
    /// Errors from window or GPU creation, or from `App::on_start`, end the
    /// loop and are returned here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.finish()
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    clock: FrameClock,
    started: bool,
    exit_requested: bool,
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            clock: FrameClock::new(),
            started: false,
            exit_requested: false,
            error: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(self.config.window_attributes())
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()?;

        let app = &mut self.app;
        entry.with_gpu(|gpu| {
            gpu.log_adapter_info();
            let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format());
            app.on_start(&ctx)
        })?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        self.started = true;
        self.clock = FrameClock::new();
        Ok(())
    }

    /// Sets the quit flag and releases the window and its GPU context.
    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.shut_down();
        event_loop.exit();
    }

    /// Sets the quit flag and drops the window; `on_exit` only runs for an
    /// app whose `on_start` succeeded.
    fn shut_down(&mut self) {
        if self.exit_requested {
            return;
        }
        self.exit_requested = true;
        self.entry = None;
        if self.started {
            self.app.on_exit(self.clock.stats());
        }
    }

    /// Records the first fatal error; `Runtime::run` returns it after the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::debug!("runtime stopping: {err}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.request_exit(event_loop);
    }

    fn redraw(&mut self) -> AppControl {
        let Some(entry) = self.entry.as_mut() else {
            return AppControl::Continue;
        };

        let time = self.clock.tick();
        let app = &mut self.app;
        let (control, presented) = entry.with_mut(|fields| {
            let mut ctx = FrameCtx::new(fields.window, fields.gpu, time);
            let control = app.on_frame(&mut ctx);
            (control, ctx.presented())
        });

        if presented {
            self.clock.record_presented();
        }
        control
    }

    fn resize_to_window(&mut self) {
        if let Some(entry) = self.entry.as_mut() {
            let size = entry.with_window(|w| w.inner_size());
            entry.with_gpu_mut(|gpu| gpu.resize(size));
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn finish(mut self) -> Result<()> {
        self.shut_down();

        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation is paced by the swapchain.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
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

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => self.resize_to_window(),

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{Position, Size};

    #[test]
    fn window_attributes_follow_config() {
        let config = RuntimeConfig {
            title: "window".to_string(),
            position: Some(LogicalPosition::new(50.0, 50.0)),
            initial_size: LogicalSize::new(600.0, 480.0),
            resizable: false,
        };

        let attrs = config.window_attributes();
        assert_eq!(attrs.title, "window");
        assert!(!attrs.resizable);
        assert_eq!(
            attrs.inner_size,
            Some(Size::Logical(LogicalSize::new(600.0, 480.0)))
        );
        assert_eq!(
            attrs.position,
            Some(Position::Logical(LogicalPosition::new(50.0, 50.0)))
        );
    }

    #[derive(Default)]
    struct ExitCounter {
        exits: u32,
    }

    impl App for ExitCounter {
        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> AppControl {
            AppControl::Continue
        }

        fn on_exit(&mut self, _stats: crate::time::FrameStats) {
            self.exits += 1;
        }
    }

    fn state() -> AppState<ExitCounter> {
        AppState::new(RuntimeConfig::default(), GpuInit::default(), ExitCounter::default())
    }

    #[test]
    fn failed_startup_skips_exit_summary() {
        let mut state = state();
        state.shut_down();
        assert!(state.exit_requested);
        assert_eq!(state.app.exits, 0);
    }

    #[test]
    fn started_app_sees_exit_once() {
        let mut state = state();
        state.started = true;
        state.shut_down();
        state.shut_down();
        assert_eq!(state.app.exits, 1);
    }

    #[test]
    fn finish_returns_recorded_error() {
        let mut state = state();
        state.error = Some(anyhow::anyhow!("no adapter"));
        let err = state.finish().unwrap_err();
        assert_eq!(err.to_string(), "no adapter");
    }

    #[test]
    fn default_config_leaves_position_to_platform() {
        let attrs = RuntimeConfig::default().window_attributes();
        assert!(attrs.position.is_none());
        assert!(attrs.resizable);
    }
}
