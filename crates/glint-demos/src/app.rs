use anyhow::Result;
use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::render::{
    load_shader_source, GpuMesh, Mesh, ProgramDesc, RenderCtx, ShaderProgram, Vertex,
};
use glint_engine::time::FrameStats;
use winit::event::WindowEvent;

use crate::config::SceneConfig;

/// Renders one static mesh with one shader program, every frame, until the
/// window is closed.
pub struct SceneApp<V> {
    config: SceneConfig,
    mesh: Mesh<V>,
    gpu: Option<SceneGpu>,
}

/// Device resources, created once in `on_start`.
struct SceneGpu {
    mesh: GpuMesh,
    program: ShaderProgram,
}

impl<V: Vertex> SceneApp<V> {
    pub fn new(config: SceneConfig, mesh: Mesh<V>) -> Self {
        Self {
            config,
            mesh,
            gpu: None,
        }
    }
}

impl<V: Vertex> App for SceneApp<V> {
    fn on_start(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let label = self.config.label;
        let mesh = self.mesh.upload(ctx.device, label);

        let vertex_source = load_shader_source(&self.config.vertex_shader)?;
        let fragment_source = load_shader_source(&self.config.fragment_shader)?;
        let program = ShaderProgram::link(
            ctx,
            ProgramDesc {
                label,
                vertex_source: &vertex_source,
                fragment_source: &fragment_source,
                vertex_layout: V::layout(),
            },
        )?;

        log::debug!("`{label}` draws {:?}", mesh.draw_call());
        self.gpu = Some(SceneGpu { mesh, program });
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Bye!");
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let gpu = self.gpu.as_ref();
        ctx.render(self.config.clear_color, |rpass| {
            if let Some(SceneGpu { mesh, program }) = gpu {
                program.bind(rpass);
                mesh.draw(rpass);
            }
        })
    }

    fn on_exit(&mut self, stats: FrameStats) {
        log::info!(
            "`{}` presented {} frames in {:.1}s ({:.1} fps)",
            self.config.label,
            stats.frames,
            stats.elapsed.as_secs_f64(),
            stats.average_fps()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes;

    fn app() -> SceneApp<glint_engine::render::PositionVertex> {
        SceneApp::new(
            SceneConfig::new("test", "triangles.vert.wgsl", "triangles.frag.wgsl"),
            scenes::triangle_pair().unwrap(),
        )
    }

    #[test]
    fn close_request_exits() {
        let mut app = app();
        assert_eq!(app.on_window_event(&WindowEvent::CloseRequested), AppControl::Exit);
    }

    #[test]
    fn other_events_keep_running() {
        let mut app = app();
        assert_eq!(app.on_window_event(&WindowEvent::Focused(true)), AppControl::Continue);
        assert_eq!(app.on_window_event(&WindowEvent::RedrawRequested), AppControl::Continue);
        assert_eq!(app.on_window_event(&WindowEvent::Occluded(false)), AppControl::Continue);
    }
}
