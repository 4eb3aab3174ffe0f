//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so configuration and sampling failures propagate
//! with `?` all the way up to the replication runner.

use thiserror::Error;

/// The error type for `seirs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("exponential mean must be finite and non-negative, got {mean}")]
    InvalidDistribution { mean: f64 },
}

/// Shorthand result type for `seirs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
