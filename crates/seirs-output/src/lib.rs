//! `seirs-output` — per-replication result files for the seirs simulator.
//!
//! Each replication writes one CSV table:
//!
//! ```text
//! Day,S,E,I,R
//! 0,19834,142,21,3
//! 1,...
//! ```
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `seirs_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use seirs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::create(Path::new("results/replication_1.csv"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! let outcome = engine.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```
//!
//! [`write_replications`] does the whole thing for every replication of a
//! [`ReplicationRunner`](seirs_sim::ReplicationRunner).

pub mod csv;
pub mod error;
pub mod files;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::{CsvWriter, read_records};
pub use error::{OutputError, OutputResult};
pub use files::{prepare_results_dir, replication_path, write_replication, write_replications};
pub use observer::SimOutputObserver;
pub use row::CompartmentRow;
pub use writer::OutputWriter;
