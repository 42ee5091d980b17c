//! The `SummaryWriter` trait implemented by statistics log backends.

use crate::{StatsResult, SummaryRow};

pub trait SummaryWriter {
    /// Append one summary row.
    fn write_summary(&mut self, row: &SummaryRow) -> StatsResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> StatsResult<()>;
}
