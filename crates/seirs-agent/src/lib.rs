//! `seirs-agent` — agent records and population storage.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`status`]   | `Status` (four-state SEIRS enum), `StatusCounts`           |
//! | [`agent`]    | `Agent`, `DwellTimes`                                      |
//! | [`store`]    | `Population` (indexed by `AgentId`)                        |
//! | [`builder`]  | `PopulationBuilder` (initial population from a `SimRng`)   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.      |

pub mod agent;
pub mod builder;
pub mod status;
pub mod store;


pub use agent::{Agent, DwellTimes};
pub use builder::PopulationBuilder;
pub use status::{Status, StatusCounts};
pub use store::Population;
