//! CSV statistics log.
//!
//! Every run appends one row to the same file, so successive runs can be
//! compared:
//!
//! ```text
//! unix_time_secs,runs,max_us,min_us,mean_us,variance_us2
//! 1760000000,5000,812.4,95.1,130.7,2210.3
//! ```

use std::fs::{File, OpenOptions};
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::writer::SummaryWriter;
use crate::{StatsResult, SummaryRow};

pub const HEADER: [&str; 6] = ["unix_time_secs", "runs", "max_us", "min_us", "mean_us", "variance_us2"];

/// Appends summary rows to a CSV file.
pub struct CsvSummaryWriter {
    writer:   Writer<File>,
    finished: bool,
}

impl CsvSummaryWriter {
    /// Open `path` for appending, creating it if needed.  The header row is
    /// written only when the file is new or empty.
    pub fn open(path: &Path) -> StatsResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if is_empty {
            writer.write_record(HEADER)?;
        }
        tracing::debug!(path = %path.display(), new_file = is_empty, "opened stats log");

        Ok(Self { writer, finished: false })
    }
}

impl SummaryWriter for CsvSummaryWriter {
    fn write_summary(&mut self, row: &SummaryRow) -> StatsResult<()> {
        let s = &row.summary;
        self.writer.write_record(&[
            row.unix_time_secs.to_string(),
            s.runs.to_string(),
            s.max_us.to_string(),
            s.min_us.to_string(),
            s.mean_us.to_string(),
            s.variance_us2.to_string(),
        ])?;
        self.finished = false;
        Ok(())
    }

    fn finish(&mut self) -> StatsResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for CsvSummaryWriter {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            tracing::error!(error = %e, "failed to flush stats log");
        }
    }
}
