//! Simulation observer trait for progress reporting and data collection.

use std::ops::ControlFlow;

use seirs_core::Day;

use crate::DailyRecord;

/// Callbacks invoked by [`EpidemicEngine::run`][crate::EpidemicEngine::run]
/// at day boundaries.
///
/// All methods have default implementations so implementors only need to
/// override what they care about.
///
/// # Stopping early
///
/// `on_day_end` receives the complete record for the day.  Returning
/// `ControlFlow::Break(())` stops the run there: no further day starts and
/// the engine reports [`SimError::Aborted`][crate::SimError::Aborted].
/// Anything the observer wrote up to that point consists of whole records.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u32 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_day_end(&mut self, record: &DailyRecord) -> ControlFlow<()> {
///         if (record.day.0 + 1) % self.interval == 0 {
///             println!("{}: {}", record.day, record.counts);
///         }
///         ControlFlow::Continue(())
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each day, before agents move.
    fn on_day_start(&mut self, _day: Day) {}

    /// Called with the finished record of each day.
    fn on_day_end(&mut self, _record: &DailyRecord) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Called once after the final day completes.  Not called when the run
    /// was stopped by `on_day_end`.
    fn on_sim_end(&mut self, _final_day: Day) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps every record in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordCollector {
    pub records: Vec<DailyRecord>,
}

impl RecordCollector {
    pub fn into_records(self) -> Vec<DailyRecord> {
        self.records
    }
}

impl SimObserver for RecordCollector {
    fn on_day_end(&mut self, record: &DailyRecord) -> ControlFlow<()> {
        self.records.push(*record);
        ControlFlow::Continue(())
    }
}
