//! Core state machine types.
//!
//! This module contains the definitions shared by every machine variant:
//! - State definitions with enter/exit callbacks
//! - Machine configuration
//! - The executor strategy applying a state's effects
//! - Errors returned by registry operations

mod config;
mod error;
mod executor;
mod state;

pub use config::Config;
pub use error::MachineError;
pub use executor::StateExecutor;
pub use state::{Callback, OnChangeState, State, StateKey};
