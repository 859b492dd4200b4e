//! Error types for dinescope.
//!
//! The filtering core itself never fails in normal operation: classifiers
//! degrade to defaults, the builder degrades per-field, the evaluator
//! safe-excludes, the codec drops unrecognized tokens. What remains fallible
//! is the configuration surface and the JSON convenience helpers.

use thiserror::Error;

/// Errors surfaced by dinescope.
#[derive(Debug, Error)]
pub enum DsError {
    /// Configuration file or environment override problem.
    #[error("config error: {0}")]
    Config(String),

    /// JSON (de)serialization failure in a convenience helper.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DsError>;
