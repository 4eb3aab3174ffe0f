//! `seirs-core` — foundational types for the seirs grid simulator.
//!
//! This crate is a dependency of every other `seirs-*` crate.  It has no
//! `seirs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `CellId`                                   |
//! | [`day`]         | `Day`                                                 |
//! | [`rng`]         | `Mt19937` (canonical generator), `SimRng` (engine stream) |
//! | [`config`]      | `EpidemicConfig`, `DwellMeans`                        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Day` and config.   |

pub mod config;
pub mod day;
pub mod error;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DwellMeans, EpidemicConfig};
pub use day::Day;
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, CellId};
pub use rng::{Mt19937, SimRng};
