use std::path::PathBuf;

use anyhow::Result;
use glint_engine::device::GpuInit;
use glint_engine::paint::Color;
use glint_engine::render::{Mesh, Vertex};
use glint_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::{LogicalPosition, LogicalSize};

use crate::app::SceneApp;

/// Directory holding the WGSL sources shipped with the demos.
pub const SHADER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders");

pub const WINDOW_TITLE: &str = "window";
pub const WINDOW_POSITION: (f64, f64) = (50.0, 50.0);
pub const WINDOW_SIZE: (f64, f64) = (600.0, 480.0);

/// Everything a demo needs besides its mesh.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Used for GPU object labels and log lines.
    pub label: &'static str,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub clear_color: Color,
    pub window: RuntimeConfig,
}

impl SceneConfig {
    /// Fixed 600x480 window, yellow background, shaders taken from
    /// [`SHADER_DIR`] by file name.
    pub fn new(label: &'static str, vertex_shader: &str, fragment_shader: &str) -> Self {
        Self {
            label,
            vertex_shader: shader_path(vertex_shader),
            fragment_shader: shader_path(fragment_shader),
            clear_color: Color::YELLOW,
            window: fixed_window(),
        }
    }
}

pub fn shader_path(file_name: &str) -> PathBuf {
    PathBuf::from(SHADER_DIR).join(file_name)
}

fn fixed_window() -> RuntimeConfig {
    RuntimeConfig {
        title: WINDOW_TITLE.to_string(),
        position: Some(LogicalPosition::new(WINDOW_POSITION.0, WINDOW_POSITION.1)),
        initial_size: LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1),
        resizable: false,
    }
}

/// Opens the window and renders `mesh` with the configured shaders until the
/// window is closed.
pub fn run_scene<V>(config: SceneConfig, mesh: Mesh<V>) -> Result<()>
where
    V: Vertex + 'static,
{
    log::info!("starting `{}`", config.label);
    let window = config.window.clone();
    Runtime::run(window, GpuInit::default(), SceneApp::new(config, mesh))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaders_resolve_inside_the_crate() {
        let config = SceneConfig::new("t", "a.vert.wgsl", "a.frag.wgsl");
        assert!(config.vertex_shader.starts_with(SHADER_DIR));
        assert!(config.fragment_shader.ends_with("a.frag.wgsl"));
    }

    #[test]
    fn window_is_fixed_size() {
        let config = SceneConfig::new("t", "a", "b");
        assert_eq!(config.window.title, "window");
        assert_eq!(config.window.initial_size, LogicalSize::new(600.0, 480.0));
        assert!(!config.window.resizable);
        assert_eq!(config.clear_color, Color::YELLOW);
    }

    #[test]
    fn shipped_shaders_exist() {
        for name in [
            "triangles.vert.wgsl",
            "triangles.frag.wgsl",
            "quad.vert.wgsl",
            "quad.frag.wgsl",
        ] {
            assert!(shader_path(name).is_file(), "missing {name}");
        }
    }
}
