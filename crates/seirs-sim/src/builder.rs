//! Fluent builder for constructing an [`EpidemicEngine`].

use seirs_agent::{Population, PopulationBuilder};
use seirs_core::{EpidemicConfig, SimRng};
use seirs_spatial::{SpatialIndex, ToroidalGrid};

use crate::{EpidemicEngine, SimError, SimResult};

/// Fluent builder for [`EpidemicEngine`].
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                          |
/// |--------------------|--------------------------------------------------|
/// | `.seed(s)`         | `config.base_seed`                               |
/// | `.population(p)`   | Drawn from the engine's own stream at build time |
///
/// When no population is supplied, initialisation consumes the seeded stream
/// before day 0, so a given seed fixes both the initial population and the
/// whole trajectory.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config).seed(1003).build()?;
/// engine.run(&mut NoopObserver)?;
/// ```
pub struct EngineBuilder {
    config:     EpidemicConfig,
    seed:       Option<u64>,
    population: Option<Population>,
}

impl EngineBuilder {
    pub fn new(config: EpidemicConfig) -> Self {
        Self { config, seed: None, population: None }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Supply a hand-built population (must match `config.agent_count` and
    /// lie inside the grid).  The stream is then used only by the day loop.
    pub fn population(mut self, population: Population) -> Self {
        self.population = Some(population);
        self
    }

    /// Validate inputs, seed the stream, and return a ready-to-run engine.
    pub fn build(self) -> SimResult<EpidemicEngine> {
        self.config.validate()?;
        let seed = self.seed.unwrap_or(self.config.base_seed);
        let mut rng = SimRng::new(seed);

        let grid = ToroidalGrid::new(self.config.grid_size)?;

        let population = match self.population {
            Some(p) => {
                if p.len() != self.config.agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: self.config.agent_count,
                        got:      p.len(),
                        what:     "population",
                    });
                }
                let size = grid.size();
                if let Some((i, a)) = p
                    .as_slice()
                    .iter()
                    .enumerate()
                    .find(|(_, a)| a.x >= size || a.y >= size)
                {
                    return Err(SimError::Config(format!(
                        "agent {i} at ({}, {}) is outside the {size}×{size} grid",
                        a.x, a.y
                    )));
                }
                p
            }
            None => PopulationBuilder::from_config(&self.config).build(&mut rng)?,
        };

        Ok(EpidemicEngine::new(
            self.config,
            seed,
            population,
            SpatialIndex::new(grid),
            rng,
        ))
    }
}
