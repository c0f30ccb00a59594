//! Glint engine crate.
//!
//! Owns the platform + GPU pieces the demo binaries are built on: a single
//! window, its wgpu context, static geometry upload and shader programs.

pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;

#[cfg(test)]
mod testing;
