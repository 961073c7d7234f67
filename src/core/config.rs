//! Machine configuration.

use super::error::MachineError;
use super::state::{OnChangeState, StateKey};
use std::fmt;
use std::sync::Arc;

/// Configuration of a state machine.
///
/// Holds the initial state used by `start()` when nothing was restored, and
/// the default callback notified on every state change.
#[derive(Clone, Default)]
pub struct Config {
    initial_state: Option<StateKey>,
    on_change_state: Option<OnChangeState>,
}

impl Config {
    /// State entered on `start()` when nothing was restored.
    pub fn initial_state(&self) -> Option<StateKey> {
        self.initial_state
    }

    /// Set the state entered on `start()`.
    ///
    /// Returns `MachineError::InvalidKey` for negative keys and leaves the
    /// previous value untouched.
    pub fn set_initial_state(&mut self, key: impl Into<StateKey>) -> Result<(), MachineError> {
        let key = key.into();
        if key < 0 {
            return Err(MachineError::InvalidKey(key));
        }
        self.initial_state = Some(key);
        Ok(())
    }

    /// Default callback notified with the target key of every change.
    pub fn on_change_state(&self) -> Option<&OnChangeState> {
        self.on_change_state.as_ref()
    }

    /// Replace the default change callback.
    pub fn set_on_change_state<F>(&mut self, callback: F)
    where
        F: Fn(StateKey) + Send + Sync + 'static,
    {
        self.on_change_state = Some(Arc::new(callback));
    }

    /// Remove the default change callback.
    pub fn clear_on_change_state(&mut self) {
        self.on_change_state = None;
    }

    /// Back to defaults, as on `shutdown()`.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("initial_state", &self.initial_state)
            .field("has_on_change_state", &self.on_change_state.is_some())
            .finish()
    }
}
