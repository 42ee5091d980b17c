//! `boids-stats`: frame timing statistics for the boids simulation.
//!
//! [`FrameStats`] plugs into the simulation as a
//! [`FrameObserver`](boids_sim::FrameObserver) and times the update phases of
//! each frame.  At the end of a run its [`StatsSummary`] is appended to a log
//! through a [`SummaryWriter`]:
//!
//! | Backend              | Output                              |
//! |----------------------|-------------------------------------|
//! | [`CsvSummaryWriter`] | One CSV row per run, header once    |
//!
//! ```rust,ignore
//! let mut stats = FrameStats::new();
//! sim.run(&mut WallClock::new(), &mut stats);
//! if let Some(summary) = stats.summary() {
//!     let mut log = CsvSummaryWriter::open(Path::new("stats.csv"))?;
//!     log.write_summary(&SummaryRow::now(summary))?;
//!     log.finish()?;
//! }
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod stats;
pub mod writer;


pub use self::csv::CsvSummaryWriter;
pub use error::{StatsError, StatsResult};
pub use row::SummaryRow;
pub use stats::{DEFAULT_LOG_EVERY, FrameStats, StatsSummary};
pub use writer::SummaryWriter;
