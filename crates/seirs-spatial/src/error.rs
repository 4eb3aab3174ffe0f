//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `seirs-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("grid side must be at least 1")]
    EmptyGrid,

    #[error("grid side {0} gives more cells than a CellId can address")]
    GridTooLarge(u32),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
