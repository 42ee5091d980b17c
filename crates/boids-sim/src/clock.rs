//! Frame timing sources.
//!
//! The enclosing frame loop owns time and decides when to stop; the pipeline
//! only receives one elapsed-seconds scalar per frame.

use std::time::Instant;

/// Supplies the elapsed time for the next frame, or `None` to stop the run.
pub trait FrameClock {
    fn next_frame(&mut self) -> Option<f32>;
}

/// Any `FnMut() -> Option<f32>` is a clock, which covers custom quit signals.
impl<F: FnMut() -> Option<f32>> FrameClock for F {
    fn next_frame(&mut self) -> Option<f32> {
        self()
    }
}

/// The same elapsed time every frame.  Deterministic; used by tests and
/// benchmarks.
#[derive(Copy, Clone, Debug)]
pub struct FixedStep(pub f32);

impl FrameClock for FixedStep {
    fn next_frame(&mut self) -> Option<f32> {
        Some(self.0)
    }
}

/// Real elapsed time between consecutive frame starts.
#[derive(Debug)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for WallClock {
    fn next_frame(&mut self) -> Option<f32> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        Some(elapsed)
    }
}
