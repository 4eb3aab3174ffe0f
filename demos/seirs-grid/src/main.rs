//! `seirs-grid` — spatial SEIRS epidemic on a 300×300 torus.
//!
//! 20 000 agents are scattered uniformly over the grid every day; a
//! Susceptible agent is infected with probability `1 - exp(-k·Ni)` where `Ni`
//! counts Infectious agents in its 3×3 neighbourhood.  30 independent
//! replications of 720 days each are written to `results_rust/`.
//!
//! Run with:
//!   cargo run -p seirs-grid --release
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use memory_stats::memory_stats;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seirs_agent::StatusCounts;
use seirs_core::{Day, DwellMeans, EpidemicConfig};
use seirs_output::{
    CsvWriter, OutputError, OutputWriter, SimOutputObserver, prepare_results_dir, replication_path,
};
use seirs_sim::{DailyRecord, ReplicationPlan, ReplicationRunner, SimObserver};

// ── Memory helper ─────────────────────────────────────────────────────────────

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:            usize = 20_000;
const GRID_SIZE:              u32   = 300;
const SIM_DAYS:               u32   = 720;
const REPLICATIONS:           u32   = 30;
const BASE_SEED:              u64   = 1_000; // replication r uses BASE_SEED + r
const INITIAL_INFECTIOUS:     usize = 20;
const CONTACT_RATE:           f64   = 0.5;
/// Log a progress line every N days of each replication.
const PROGRESS_INTERVAL_DAYS: u32   = 100;
const RESULTS_DIR:            &str  = "results_rust";

// ── Progress observer ─────────────────────────────────────────────────────────

/// Logs progress and remembers the last record, then forwards to the file
/// writer.
struct ProgressObserver<W: OutputWriter> {
    inner:       SimOutputObserver<W>,
    replication: u32,
    last:        Option<DailyRecord>,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: SimOutputObserver<W>, plan: ReplicationPlan) -> Self {
        Self { inner, replication: plan.index + 1, last: None }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_day_start(&mut self, day: Day) {
        self.inner.on_day_start(day);
    }

    fn on_day_end(&mut self, record: &DailyRecord) -> ControlFlow<()> {
        if record.day.0 % PROGRESS_INTERVAL_DAYS == 0 {
            info!(
                replication = self.replication,
                day = record.day.0,
                counts = %record.counts,
                "progress"
            );
        }
        self.last = Some(*record);
        self.inner.on_day_end(record)
    }

    fn on_sim_end(&mut self, final_day: Day) {
        self.inner.on_sim_end(final_day);
    }
}

// ── Run summary ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ReplicationSummary {
    replication:  u32,
    seed:         u64,
    file:         PathBuf,
    elapsed_secs: f64,
    final_counts: Option<StatusCounts>,
}

#[derive(Serialize)]
struct RunSummary {
    config:       EpidemicConfig,
    wall_secs:    f64,
    mem_mb:       f64,
    replications: Vec<ReplicationSummary>,
}

fn run_replication(
    dir:    &Path,
    plan:   ReplicationPlan,
    engine: &mut seirs_sim::EpidemicEngine,
) -> Result<ReplicationSummary, OutputError> {
    let path = replication_path(dir, plan);
    let t0 = Instant::now();

    let mut obs = ProgressObserver::new(SimOutputObserver::new(CsvWriter::create(&path)?), plan);
    let outcome = engine.run(&mut obs);
    if let Some(e) = obs.inner.take_error() {
        return Err(e);
    }
    outcome?;

    Ok(ReplicationSummary {
        replication:  plan.index + 1,
        seed:         plan.seed,
        file:         path,
        elapsed_secs: t0.elapsed().as_secs_f64(),
        final_counts: obs.last.map(|r| r.counts),
    })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EpidemicConfig {
        agent_count:        AGENT_COUNT,
        grid_size:          GRID_SIZE,
        days:               SIM_DAYS,
        replications:       REPLICATIONS,
        base_seed:          BASE_SEED,
        initial_infectious: INITIAL_INFECTIOUS,
        dwell_means:        DwellMeans { exposed: 3.0, infectious: 7.0, recovered: 365.0 },
        contact_rate:       CONTACT_RATE,
    };

    println!("=== seirs-grid — spatial SEIRS agent model ===");
    println!(
        "Agents: {AGENT_COUNT}  |  Grid: {GRID_SIZE}×{GRID_SIZE}  |  Days: {SIM_DAYS}  |  Replications: {REPLICATIONS}"
    );
    println!("mem[startup]              {:.0} MB", mem_mb());

    let runner = ReplicationRunner::new(config).context("invalid configuration")?;
    let dir = Path::new(RESULTS_DIR);
    prepare_results_dir(dir).with_context(|| format!("creating {}", dir.display()))?;

    // 1. Run every replication, one CSV each.
    let t0 = Instant::now();
    let results = runner.run_each(|plan, mut engine| run_replication(dir, plan, &mut engine));
    let wall_secs = t0.elapsed().as_secs_f64();
    let mem = mem_mb();

    // 2. Collect per-replication results.
    let mut replications = Vec::with_capacity(results.len());
    let mut failed = 0usize;
    for (plan, result) in results {
        match result {
            Ok(summary) => {
                println!(
                    "  replication {:>2} (seed {}) : {:.3} s  {}",
                    summary.replication,
                    summary.seed,
                    summary.elapsed_secs,
                    summary.final_counts.map(|c| c.to_string()).unwrap_or_default(),
                );
                replications.push(summary);
            }
            Err(e) => {
                warn!(replication = plan.index + 1, error = %e, "replication not written");
                failed += 1;
            }
        }
    }

    println!();
    println!("Simulation complete in {wall_secs:.3} s");
    println!("mem[after run]            {mem:.0} MB");

    // 3. Run summary next to the result files.
    let summary = RunSummary {
        config: runner.config().clone(),
        wall_secs,
        mem_mb: mem,
        replications,
    };
    let summary_path = dir.join("run_summary.json");
    let file = File::create(&summary_path)
        .with_context(|| format!("creating {}", summary_path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &summary)?;
    out.flush()?;
    info!(path = %summary_path.display(), "run summary written");

    if failed > 0 {
        bail!("{failed} of {REPLICATIONS} replications failed");
    }
    Ok(())
}
