//! Core error type.
//!
//! Configuration problems are the only errors the simulation reports: once a
//! run has started every array access is derived from the validated config.

use thiserror::Error;

/// Errors produced by `boids-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `boids-*` crates that surface config errors.
pub type CoreResult<T> = Result<T, CoreError>;
