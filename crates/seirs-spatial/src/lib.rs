//! `seirs-spatial` — lattice geometry and neighbour lookup.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `ToroidalGrid` (cell ids, wraparound, Moore block)          |
//! | [`index`]   | `SpatialIndex` (cell → agents bucket grid)                  |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |

pub mod error;
pub mod grid;
pub mod index;


pub use error::{SpatialError, SpatialResult};
pub use grid::ToroidalGrid;
pub use index::SpatialIndex;
