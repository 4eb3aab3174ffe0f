//! Fluent builder for the initial population.
//!
//! # Usage
//!
//! ```rust
//! use seirs_agent::{PopulationBuilder, Status};
//! use seirs_core::SimRng;
//!
//! let mut rng = SimRng::new(1000);
//! let population = PopulationBuilder::new(1_000)
//!     .initial_infectious(20)
//!     .grid_size(50)
//!     .build(&mut rng)
//!     .unwrap();
//!
//! assert_eq!(population.len(), 1_000);
//! assert_eq!(population.counts().infectious, 20);
//! ```

use seirs_core::{CoreError, CoreResult, DwellMeans, EpidemicConfig, SimRng};

use crate::{Agent, DwellTimes, Population, Status};

/// Fluent builder for [`Population`].
///
/// Agents `0..initial_infectious` start Infectious, the rest Susceptible.
/// For each agent in index order the stream is consumed as: dE, dI, dR, x,
/// y.  The order is part of the reproducibility contract.
#[derive(Clone, Debug)]
pub struct PopulationBuilder {
    count:              usize,
    initial_infectious: usize,
    dwell_means:        DwellMeans,
    grid_size:          u32,
}

impl PopulationBuilder {
    /// Builder for `count` agents with the default epidemiological constants.
    pub fn new(count: usize) -> Self {
        let defaults = EpidemicConfig::default();
        Self {
            count,
            initial_infectious: defaults.initial_infectious,
            dwell_means:        defaults.dwell_means,
            grid_size:          defaults.grid_size,
        }
    }

    /// Builder matching every population-related field of `config`.
    pub fn from_config(config: &EpidemicConfig) -> Self {
        Self {
            count:              config.agent_count,
            initial_infectious: config.initial_infectious,
            dwell_means:        config.dwell_means,
            grid_size:          config.grid_size,
        }
    }

    /// Number of leading agents that start Infectious (clamped to the
    /// population size).
    pub fn initial_infectious(mut self, n: usize) -> Self {
        self.initial_infectious = n;
        self
    }

    pub fn dwell_means(mut self, means: DwellMeans) -> Self {
        self.dwell_means = means;
        self
    }

    pub fn grid_size(mut self, size: u32) -> Self {
        self.grid_size = size;
        self
    }

    /// Draw the population from `rng`.
    pub fn build(self, rng: &mut SimRng) -> CoreResult<Population> {
        if self.grid_size == 0 {
            return Err(CoreError::Config("grid_size must be at least 1".into()));
        }

        let mut agents = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let status = if i < self.initial_infectious {
                Status::Infectious
            } else {
                Status::Susceptible
            };
            let dwell = DwellTimes {
                exposed:    rng.next_exponential(self.dwell_means.exposed)?,
                infectious: rng.next_exponential(self.dwell_means.infectious)?,
                recovered:  rng.next_exponential(self.dwell_means.recovered)?,
            };
            let x = rng.below(self.grid_size);
            let y = rng.below(self.grid_size);
            agents.push(Agent::new(status, dwell, x, y));
        }
        Ok(Population::from_agents(agents))
    }
}
