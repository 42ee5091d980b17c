//! `FrameStats` times the update phases of every frame.

use std::time::{Duration, Instant};

use boids_sim::FrameObserver;

/// Progress is logged every this many frames.
pub const DEFAULT_LOG_EVERY: u64 = 1_000;

/// Aggregate update-phase timings, all in microseconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StatsSummary {
    pub runs:         u64,
    pub max_us:       f64,
    pub min_us:       f64,
    pub mean_us:      f64,
    /// Population variance, µs².
    pub variance_us2: f64,
}

/// A [`FrameObserver`] that measures the time between `on_frame_start` and
/// `on_frame_end`.
///
/// Only running aggregates are kept (Welford), so memory use does not grow
/// with the number of frames.
#[derive(Debug)]
pub struct FrameStats {
    log_every: u64,
    started:   Option<Instant>,
    runs:      u64,
    min:       Duration,
    max:       Duration,
    mean_us:   f64,
    m2:        f64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::with_log_every(DEFAULT_LOG_EVERY)
    }

    /// Log progress every `n` frames; `0` disables progress logging.
    pub fn with_log_every(n: u64) -> Self {
        Self {
            log_every: n,
            started:   None,
            runs:      0,
            min:       Duration::MAX,
            max:       Duration::ZERO,
            mean_us:   0.0,
            m2:        0.0,
        }
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Fold one frame's duration into the aggregates.
    pub fn record(&mut self, elapsed: Duration) {
        self.runs += 1;
        self.min = self.min.min(elapsed);
        self.max = self.max.max(elapsed);

        let us = micros(elapsed);
        let delta = us - self.mean_us;
        self.mean_us += delta / self.runs as f64;
        self.m2 += delta * (us - self.mean_us);

        if self.log_every > 0 && self.runs % self.log_every == 0 {
            tracing::info!(runs = self.runs, mean_us = self.mean_us, "reached frame");
        }
    }

    /// `None` until at least one frame has been recorded.
    pub fn summary(&self) -> Option<StatsSummary> {
        if self.runs == 0 {
            return None;
        }
        Some(StatsSummary {
            runs:         self.runs,
            max_us:       micros(self.max),
            min_us:       micros(self.min),
            mean_us:      self.mean_us,
            variance_us2: self.m2 / self.runs as f64,
        })
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameObserver for FrameStats {
    fn on_frame_start(&mut self, _frame: u64) {
        self.started = Some(Instant::now());
    }

    fn on_frame_end(&mut self, frame: u64) {
        match self.started.take() {
            Some(start) => self.record(start.elapsed()),
            None => tracing::warn!(frame, "frame ended without a recorded start"),
        }
    }

    fn on_sim_end(&mut self, frames: u64) {
        if let Some(s) = self.summary() {
            tracing::debug!(
                frames,
                runs = s.runs,
                min_us = s.min_us,
                max_us = s.max_us,
                mean_us = s.mean_us,
                "frame timing summary"
            );
        }
    }
}

#[inline]
fn micros(d: Duration) -> f64 {
    d.as_secs_f64() * 1e6
}
