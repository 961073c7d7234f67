//! Compute errors.

use thiserror::Error;

/// Errors a computation can end with.
///
/// These never propagate out of the holder: a failed computation leaves the
/// value uncomputed and the error is kept for `last_error()`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComputeError {
    /// The computation reported a failure
    #[error("Computation failed: {0}")]
    Failed(String),

    /// The worker was interrupted before finishing
    #[error("Computation interrupted")]
    Interrupted,

    /// The computation panicked
    #[error("Computation panicked: {0}")]
    Panicked(String),
}

impl ComputeError {
    /// Wrap any displayable error as a failure.
    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self::Failed(error.to_string())
    }
}
