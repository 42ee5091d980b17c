//! Row type written by [`SummaryWriter`][crate::SummaryWriter] backends.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::StatsSummary;

/// One line of the statistics log: a summary stamped with the time it was
/// written.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub unix_time_secs: i64,
    pub summary:        StatsSummary,
}

impl SummaryRow {
    /// Stamp `summary` with the current wall-clock time.
    pub fn now(summary: StatsSummary) -> Self {
        let unix_time_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Self { unix_time_secs, summary }
    }
}
