//! Frame observer trait for timing hooks and presentation output.

use crate::Triangle;

/// Callbacks invoked by [`FlockSim::step`][crate::FlockSim::step].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: frame counter
///
/// ```rust,ignore
/// struct Counter(u64);
///
/// impl FrameObserver for Counter {
///     fn on_frame_end(&mut self, _frame: u64) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait FrameObserver {
    /// Called immediately before the steering phase starts.
    fn on_frame_start(&mut self, _frame: u64) {}

    /// Called immediately after the last agent has been re-indexed.
    ///
    /// The interval between `on_frame_start` and `on_frame_end` covers exactly
    /// the three update phases, nothing else.
    fn on_frame_end(&mut self, _frame: u64) {}

    /// Called after the presentation triangles have been refreshed.
    /// `triangles[i]` belongs to `AgentId(i)`.
    fn on_geometry(&mut self, _frame: u64, _triangles: &[Triangle]) {}

    /// Called once when [`FlockSim::run`][crate::FlockSim::run] stops, with
    /// the total number of frames simulated so far.
    fn on_sim_end(&mut self, _frames: u64) {}
}

/// A [`FrameObserver`] that does nothing.
pub struct NoopObserver;

impl FrameObserver for NoopObserver {}
