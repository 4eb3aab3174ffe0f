//! The `OutputWriter` trait implemented by backend writers.

use seirs_sim::DailyRecord;

use crate::OutputResult;

/// Sink for one replication's daily records.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write one complete daily record.
    fn write_record(&mut self, record: &DailyRecord) -> OutputResult<()>;

    /// Flush all buffered rows.
    ///
    /// Idempotent: calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
