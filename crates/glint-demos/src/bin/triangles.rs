//! Two unindexed triangles on a yellow background.

use glint_demos::{run_scene, scenes, SceneConfig};
use glint_engine::logging::{init_logging, LoggingConfig};

fn main() {
    init_logging(LoggingConfig::default());

    let result = scenes::triangle_pair().and_then(|mesh| {
        run_scene(
            SceneConfig::new("triangles", "triangles.vert.wgsl", "triangles.frag.wgsl"),
            mesh,
        )
    });

    if let Err(e) = result {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
