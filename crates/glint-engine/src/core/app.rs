use anyhow::Result;
use winit::event::WindowEvent;

use crate::render::RenderCtx;
use crate::time::FrameStats;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the demos.
///
/// Call order: `on_start` once after the GPU is ready, then
/// `on_window_event`/`on_frame` until one returns `Exit` or the window
/// closes, then `on_exit` once.
pub trait App {
    /// Creates the app's GPU resources. An error aborts the run.
    fn on_start(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once when the loop ends.
    fn on_exit(&mut self, stats: FrameStats) {
        let _ = stats;
    }
}
