//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue for the window
//! - configuring the Surface (swapchain) and reacting to surface errors
//! - acquiring frames and providing an encoder + view for rendering

mod error;
mod frame;
mod gpu;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::{Gpu, GpuInit};
