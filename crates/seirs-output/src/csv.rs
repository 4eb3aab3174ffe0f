//! CSV output backend.
//!
//! One file per replication, header `Day,S,E,I,R`, one row per simulated day.

use std::fs::File;
use std::io;
use std::path::Path;

use ::csv::{Reader, Writer, WriterBuilder};
use seirs_sim::DailyRecord;

use crate::row::CompartmentRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Writes daily records as CSV rows to any `io::Write`.
pub struct CsvWriter<W: io::Write = File> {
    inner:    Writer<W>,
    finished: bool,
}

impl CsvWriter<File> {
    /// Create (or truncate) the file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Self::from_writer(file)
    }
}

impl<W: io::Write> CsvWriter<W> {
    /// Wrap `writer` and write the header row.
    ///
    /// The header is written eagerly so a run with zero days still produces
    /// a well-formed file.
    pub fn from_writer(writer: W) -> OutputResult<Self> {
        let mut inner = WriterBuilder::new().has_headers(false).from_writer(writer);
        inner.write_record(CompartmentRow::HEADER)?;
        Ok(Self { inner, finished: false })
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> OutputResult<W> {
        self.inner
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: io::Write> OutputWriter for CsvWriter<W> {
    fn write_record(&mut self, record: &DailyRecord) -> OutputResult<()> {
        self.inner.serialize(CompartmentRow::from(record))?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }
}

/// Read back a replication file written by [`CsvWriter`].
pub fn read_records(path: &Path) -> OutputResult<Vec<DailyRecord>> {
    let mut reader = Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<CompartmentRow>() {
        records.push(DailyRecord::from(row?));
    }
    Ok(records)
}
