//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use std::ops::ControlFlow;

use seirs_core::Day;
use seirs_sim::{DailyRecord, SimObserver};
use tracing::warn;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every daily record to an [`OutputWriter`].
///
/// The first write error is stored and the run is stopped at that day
/// (`on_day_end` returns `Break`, so `engine.run` reports
/// `SimError::Aborted`).  Fetch the stored error with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    written:    u32,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0, last_error: None }
    }

    /// Number of records written so far.
    pub fn written(&self) -> u32 {
        self.written
    }

    /// Take the stored write error (if any) after `engine.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) -> ControlFlow<()> {
        match result {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                warn!(error = %e, "output write failed");
                // Keep only the first error.
                if self.last_error.is_none() {
                    self.last_error = Some(e);
                }
                ControlFlow::Break(())
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_day_end(&mut self, record: &DailyRecord) -> ControlFlow<()> {
        let result = self.writer.write_record(record);
        if result.is_ok() {
            self.written += 1;
        }
        self.store_err(result)
    }

    fn on_sim_end(&mut self, _final_day: Day) {
        let result = self.writer.finish();
        let _ = self.store_err(result);
    }
}
