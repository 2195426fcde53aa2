//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! via `#[from]` or keep it as a wrapped variant.  Both patterns are fine;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

/// Errors produced by `foodshed-core` type constructors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown travel mode {0:?} (expected euclidean, walk, or drive)")]
    UnknownMode(String),

    #[error("distance {0} mi outside the supported 0.1–1.0 mile range")]
    DistanceOutOfRange(f64),
}

/// Shorthand result type for core constructors.
pub type CoreResult<T> = Result<T, CoreError>;
