//! The `EpidemicEngine` struct and its day loop.

use std::ops::ControlFlow;

use seirs_agent::{Population, StatusCounts};
use seirs_core::{AgentId, Day, EpidemicConfig, SimRng};
use seirs_spatial::SpatialIndex;
use tracing::{debug, trace};

use crate::transition::{TransitionTally, advance_agent};
use crate::{DailyRecord, SimError, SimObserver, SimResult};

/// One replication's simulation state.
///
/// Owns its population, spatial index and random stream; nothing is shared
/// with other engines, so independent engines may run on different threads.
/// Within an engine every step is sequential.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct EpidemicEngine {
    /// Validated configuration.  `days` bounds [`run`](Self::run).
    pub config: EpidemicConfig,

    /// Seed the stream was initialised with.
    pub seed: u64,

    /// Agent records, mutated in place every day.
    pub population: Population,

    day:   Day,
    index: SpatialIndex,
    rng:   SimRng,
    /// Visit order buffer, reset to `0..n` and reshuffled every day.
    order: Vec<AgentId>,
}

impl EpidemicEngine {
    pub(crate) fn new(
        config:     EpidemicConfig,
        seed:       u64,
        population: Population,
        index:      SpatialIndex,
        rng:        SimRng,
    ) -> Self {
        let order = Vec::with_capacity(population.len());
        Self {
            config,
            seed,
            population,
            day: Day::ZERO,
            index,
            rng,
            order,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// The next day to be simulated (equals the number of days done).
    #[inline]
    pub fn current_day(&self) -> Day {
        self.day
    }

    /// The index as rebuilt at the start of the last simulated day.
    #[inline]
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn counts(&self) -> StatusCounts {
        self.population.counts()
    }

    /// Run from the current day to `config.days`.
    ///
    /// Calls observer hooks at every day boundary and `on_sim_end` once the
    /// last day is done.  Use [`NoopObserver`][crate::NoopObserver] if you
    /// don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = Day(self.config.days);
        debug!(seed = self.seed, from = self.day.0, to = end.0, "run start");
        while self.day < end {
            self.observed_day(observer)?;
        }
        observer.on_sim_end(self.day);
        debug!(seed = self.seed, counts = %self.counts(), "run complete");
        Ok(())
    }

    /// Run exactly `n` days from the current position (ignores
    /// `config.days`).  Does not call `on_sim_end`.
    pub fn run_days<O: SimObserver>(&mut self, n: u32, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_day(observer)?;
        }
        Ok(())
    }

    /// Simulate one day and return its record.
    pub fn step_day(&mut self) -> DailyRecord {
        // ① Full re-placement, not diffusion: both coordinates are redrawn.
        self.relocate_agents();

        // ② Buckets from the new positions.
        self.index.rebuild(self.population.as_slice());

        // ③ Fresh identity order, then shuffled.
        self.order.clear();
        self.order.extend(self.population.agent_ids());
        self.rng.shuffle(&mut self.order);

        // ④ Sequential update in shuffled order.
        let tally = self.update_agents();

        // ⑤ Count.
        let record = DailyRecord { day: self.day, counts: self.population.counts() };
        trace!(
            day = self.day.0,
            infections = tally.infections,
            onsets = tally.onsets,
            recoveries = tally.recoveries,
            waned = tally.waned,
            "transitions"
        );
        self.day = self.day.next();
        record
    }

    // ── Day internals ─────────────────────────────────────────────────────

    fn observed_day<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        observer.on_day_start(self.day);
        let record = self.step_day();
        debug!(day = record.day.0, counts = %record.counts, "day complete");
        match observer.on_day_end(&record) {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(()) => Err(SimError::Aborted { day: record.day }),
        }
    }

    fn relocate_agents(&mut self) {
        let size = self.index.grid().size();
        for agent in self.population.as_mut_slice() {
            agent.x = self.rng.below(size);
            agent.y = self.rng.below(size);
        }
    }

    fn update_agents(&mut self) -> TransitionTally {
        let contact_rate = self.config.contact_rate;
        let agents = self.population.as_mut_slice();
        let mut tally = TransitionTally::default();
        for &agent in &self.order {
            if let Some(t) = advance_agent(agents, agent, &self.index, &mut self.rng, contact_rate) {
                tally.record(t);
            }
        }
        tally
    }
}
