//! Result directory layout and whole-run drivers.
//!
//! ```text
//! <dir>/replication_1.csv
//! <dir>/replication_2.csv
//! ...
//! ```
//!
//! File numbering is 1-based; replication `r` (0-based) writes
//! `replication_{r+1}.csv`.

use std::fs;
use std::path::{Path, PathBuf};

use seirs_sim::{EpidemicEngine, ReplicationPlan, ReplicationRunner};
use tracing::debug;

use crate::csv::CsvWriter;
use crate::observer::SimOutputObserver;
use crate::OutputResult;

/// Create `dir` (and parents) if it does not exist.
pub fn prepare_results_dir(dir: &Path) -> OutputResult<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

pub fn replication_path(dir: &Path, plan: ReplicationPlan) -> PathBuf {
    dir.join(format!("replication_{}.csv", plan.index + 1))
}

/// Run `engine` to completion, streaming every record to a CSV at `path`.
///
/// A write error stops the run; that error is returned rather than the
/// resulting `SimError::Aborted`.
pub fn write_replication(engine: &mut EpidemicEngine, path: &Path) -> OutputResult<()> {
    let mut observer = SimOutputObserver::new(CsvWriter::create(path)?);
    let outcome = engine.run(&mut observer);
    if let Some(e) = observer.take_error() {
        return Err(e);
    }
    outcome?;
    debug!(path = %path.display(), rows = observer.written(), "replication file written");
    Ok(())
}

/// Run every replication of `runner`, writing each to its own file in `dir`.
///
/// Results come back in replication order; one failed replication does not
/// stop the others.
pub fn write_replications(
    runner: &ReplicationRunner,
    dir:    &Path,
) -> Vec<(ReplicationPlan, OutputResult<PathBuf>)> {
    runner.run_each(|plan, mut engine| {
        let path = replication_path(dir, plan);
        write_replication(&mut engine, &path)?;
        Ok(path)
    })
}
