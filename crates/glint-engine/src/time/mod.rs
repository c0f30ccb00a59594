//! Frame timing.
//!
//! One `FrameClock` per render loop: `tick()` once per presented frame, and
//! `stats()` for the summary printed at shutdown.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameStats, FrameTime};
