//! A vertex-colored quad drawn through an index buffer.

use glint_demos::{run_scene, scenes, SceneConfig};
use glint_engine::logging::{init_logging, LoggingConfig};

fn main() {
    init_logging(LoggingConfig::default());

    let result = scenes::indexed_quad().and_then(|mesh| {
        run_scene(
            SceneConfig::new("quad", "quad.vert.wgsl", "quad.frag.wgsl"),
            mesh,
        )
    });

    if let Err(e) = result {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
