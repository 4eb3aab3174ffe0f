//! `seirs-sim` — day loop orchestrator for the seirs grid simulator.
//!
//! # Day loop
//!
//! ```text
//! for day in 0..config.days:
//!   ① Move     — every agent is re-placed uniformly at random on the grid
//!                (x then y, agents in index order).
//!   ② Index    — rebuild the cell → agents buckets from the new positions.
//!   ③ Order    — Fisher-Yates shuffle of all agent ids.
//!   ④ Update   — visit agents in that order and apply the SEIRS rule.
//!                Sequential: a later visit sees infections made earlier
//!                the same day.
//!   ⑤ Count    — tally the four compartments.
//!   ⑥ Emit     — hand the DailyRecord to the observer.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs replications on Rayon's thread pool.              |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `DailyRecord`.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use seirs_core::EpidemicConfig;
//! use seirs_sim::{EngineBuilder, RecordCollector};
//!
//! let config = EpidemicConfig { days: 30, ..EpidemicConfig::default() };
//! let mut engine = EngineBuilder::new(config).seed(1000).build()?;
//! let mut records = RecordCollector::default();
//! engine.run(&mut records)?;
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod record;
pub mod replication;
pub mod transition;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::EpidemicEngine;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RecordCollector, SimObserver};
pub use record::DailyRecord;
pub use replication::{ReplicationPlan, ReplicationRunner};
pub use transition::{Transition, TransitionTally, advance_agent, infection_probability};
