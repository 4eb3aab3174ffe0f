//! Independent replications of one configuration.
//!
//! Replication `r` runs a fresh engine seeded with `base_seed + r`.  Engines
//! share nothing, so a failure in one replication is reported in its own
//! result slot and the others run to completion.  With the `parallel`
//! feature the replications are spread over Rayon's thread pool; results
//! are still returned in replication order.

use seirs_core::EpidemicConfig;
use tracing::{info, warn};

use crate::{DailyRecord, EngineBuilder, EpidemicEngine, RecordCollector, SimError, SimResult};

/// Identity of one replication.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReplicationPlan {
    /// 0-based replication index.
    pub index: u32,
    /// Seed of this replication's stream.
    pub seed:  u64,
}

/// Builds and hands out one engine per replication.
#[derive(Clone, Debug)]
pub struct ReplicationRunner {
    config: EpidemicConfig,
}

impl ReplicationRunner {
    /// Validate `config` once for the whole run.
    pub fn new(config: EpidemicConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EpidemicConfig {
        &self.config
    }

    /// Plans for replications `0..config.replications`.
    pub fn plans(&self) -> impl Iterator<Item = ReplicationPlan> + '_ {
        (0..self.config.replications).map(|index| ReplicationPlan {
            index,
            seed: self.config.replication_seed(index),
        })
    }

    /// Fresh engine for `plan`.
    pub fn engine(&self, plan: ReplicationPlan) -> SimResult<EpidemicEngine> {
        EngineBuilder::new(self.config.clone()).seed(plan.seed).build()
    }

    /// Run `job` once per replication with a freshly built engine.
    ///
    /// `job` owns the engine and decides how to drive and observe it (for
    /// example, stream records to a file).  Engine construction errors are
    /// converted into `E` and reported for that replication only.
    pub fn run_each<T, E, F>(&self, job: F) -> Vec<(ReplicationPlan, Result<T, E>)>
    where
        T: Send,
        E: From<SimError> + std::fmt::Display + Send,
        F: Fn(ReplicationPlan, EpidemicEngine) -> Result<T, E> + Sync,
    {
        let plans: Vec<ReplicationPlan> = self.plans().collect();
        let total = plans.len();

        let run_one = |plan: ReplicationPlan| {
            info!(replication = plan.index + 1, total, seed = plan.seed, "replication start");
            let result = self
                .engine(plan)
                .map_err(E::from)
                .and_then(|engine| job(plan, engine));
            match &result {
                Ok(_) => info!(replication = plan.index + 1, "replication done"),
                Err(e) => warn!(replication = plan.index + 1, error = %e, "replication failed"),
            }
            (plan, result)
        };

        #[cfg(not(feature = "parallel"))]
        {
            plans.into_iter().map(run_one).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            plans.into_par_iter().map(run_one).collect()
        }
    }

    /// Run every replication to completion and keep all series in memory.
    pub fn run_in_memory(&self) -> Vec<(ReplicationPlan, SimResult<Vec<DailyRecord>>)> {
        self.run_each(|_plan, mut engine| {
            let mut collector = RecordCollector::default();
            engine.run(&mut collector)?;
            Ok(collector.into_records())
        })
    }
}
