use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Color;
use crate::time::FrameTime;

use super::app::AppControl;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
    /// Set by `render` once the frame has been submitted.
    pub(crate) presented: bool,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    pub(crate) fn new(window: &'a Window, gpu: &'a mut Gpu<'w>, time: FrameTime) -> Self {
        Self {
            window,
            gpu,
            time,
            presented: false,
        }
    }

    /// Whether this frame reached the screen.
    pub fn presented(&self) -> bool {
        self.presented
    }

    /// Runs one render pass over the whole drawable: clears to `clear`,
    /// sets the viewport, calls `draw`, then submits and presents.
    ///
    /// Surface errors skip the frame; only an unrecoverable one returns `Exit`.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&mut wgpu::RenderPass<'_>),
    {
        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("glint frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_viewport(0.0, 0.0, size.width as f32, size.height as f32, 0.0, 1.0);
            draw(&mut rpass);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);
        self.presented = true;

        AppControl::Continue
    }
}
