//! State machine errors.

use super::state::StateKey;
use thiserror::Error;

/// Errors returned by state machine operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    /// The operation is not allowed in the machine's current lifecycle phase.
    #[error("Invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// State keys and the initial state must be >= 0.
    #[error("Invalid key {0}: state keys must be >= 0")]
    InvalidKey(StateKey),

    /// No state is registered under the requested key.
    #[error("State {0} not found. Add all states before starting or changing the machine")]
    InvalidState(StateKey),
}
