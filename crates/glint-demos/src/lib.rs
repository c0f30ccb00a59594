//! The two glint demo programs share everything except their scene: the
//! window setup, shader loading, the render loop and shutdown all live here.

pub mod app;
pub mod config;
pub mod scenes;

pub use app::SceneApp;
pub use config::{run_scene, SceneConfig};
