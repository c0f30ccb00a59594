use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Index of this frame, starting at 0.
    pub frame_index: u64,
}

/// Totals over the lifetime of a clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameStats {
    /// Frames that reached the screen; skipped frames are not counted.
    pub frames: u64,
    pub elapsed: Duration,
}

impl FrameStats {
    /// Average frames per second, 0 when no time has passed.
    pub fn average_fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 { 0.0 } else { self.frames as f64 / secs }
    }
}

/// Produces `FrameTime` snapshots and lifetime totals.
///
/// `tick` runs once per redraw attempt; `record_presented` once per frame
/// that was actually submitted.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    ticks: u64,
    presented: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            ticks: 0,
            presented: 0,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.ticks,
        };
        self.ticks = self.ticks.wrapping_add(1);
        ft
    }

    pub fn record_presented(&mut self) {
        self.presented = self.presented.wrapping_add(1);
    }

    /// Presented frames so far and the time since the clock was created.
    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frames: self.presented,
            elapsed: self.start.elapsed(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
