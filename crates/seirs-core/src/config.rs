//! Simulation configuration.
//!
//! There is no file or command-line surface: applications fill an
//! [`EpidemicConfig`] from constants (usually starting from `Default`) and
//! hand it to the engine builder or replication runner, which call
//! [`EpidemicConfig::validate`] before anything is simulated.

use crate::{CoreError, CoreResult};

/// Means of the three exponential dwell-time distributions, in days.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DwellMeans {
    pub exposed:    f64,
    pub infectious: f64,
    pub recovered:  f64,
}

impl Default for DwellMeans {
    fn default() -> Self {
        Self { exposed: 3.0, infectious: 7.0, recovered: 365.0 }
    }
}

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpidemicConfig {
    /// Number of agents.  Fixed for the whole replication.
    pub agent_count: usize,

    /// Side length of the toroidal lattice, in cells.
    pub grid_size: u32,

    /// Simulated days per replication.  One record is emitted per day.
    pub days: u32,

    /// Number of independent replications in a run.
    pub replications: u32,

    /// Seed of replication 0; replication `r` uses `base_seed + r`.
    pub base_seed: u64,

    /// How many leading agents (by index) start Infectious.  Values at or
    /// above `agent_count` make every agent start Infectious.
    pub initial_infectious: usize,

    /// Exponential means for dE, dI and dR.
    pub dwell_means: DwellMeans,

    /// `k` in the per-day infection probability `1 - exp(-k * Ni)`.
    pub contact_rate: f64,
}

impl Default for EpidemicConfig {
    fn default() -> Self {
        Self {
            agent_count:        20_000,
            grid_size:          300,
            days:               720,
            replications:       30,
            base_seed:          1000,
            initial_infectious: 20,
            dwell_means:        DwellMeans::default(),
            contact_rate:       0.5,
        }
    }
}

impl EpidemicConfig {
    /// Reject out-of-range constants before any simulation starts.
    pub fn validate(&self) -> CoreResult<()> {
        if self.agent_count == 0 {
            return Err(CoreError::Config("agent_count must be at least 1".into()));
        }
        if u32::try_from(self.agent_count).is_err() {
            return Err(CoreError::Config(format!(
                "agent_count {} exceeds the agent id range",
                self.agent_count
            )));
        }
        if self.grid_size == 0 {
            return Err(CoreError::Config("grid_size must be at least 1".into()));
        }
        if self.cell_count().is_none() {
            return Err(CoreError::Config(format!(
                "grid_size {} gives more cells than the cell id range",
                self.grid_size
            )));
        }

        let means = [
            ("mean_exposed_days", self.dwell_means.exposed),
            ("mean_infectious_days", self.dwell_means.infectious),
            ("mean_recovered_days", self.dwell_means.recovered),
            ("contact_rate", self.contact_rate),
        ];
        for (name, value) in means {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// `grid_size²`, or `None` if it does not fit a `CellId`.
    pub fn cell_count(&self) -> Option<u32> {
        self.grid_size.checked_mul(self.grid_size)
    }

    /// Seed of replication `index`.
    #[inline]
    pub fn replication_seed(&self, index: u32) -> u64 {
        self.base_seed.wrapping_add(u64::from(index))
    }
}
