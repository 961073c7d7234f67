//! Keyed state machine driving an executor.

use crate::checkpoint::{InstanceState, STATE_MACHINE_CURRENT_KEY};
use crate::core::{Config, MachineError, OnChangeState, State, StateExecutor, StateKey};
use std::collections::HashMap;
use tracing::debug;

/// Registry of keyed states with a current key and an executor.
///
/// States are registered before `start()`; afterwards the machine only moves
/// between them. All calls must be serialized by the caller, typically on the
/// UI thread.
///
/// # Example
///
/// ```rust
/// use viewstate::effects::{ViewExecutor, ViewStateMachine};
///
/// let mut machine = ViewStateMachine::new(ViewExecutor::new());
/// let loading = machine.new_state_instance();
/// let content = machine.new_state_instance();
///
/// machine.add_state(0, loading)?.add_state(1, content)?;
/// machine.config_mut().set_initial_state(0)?;
/// machine.start()?;
/// machine.change_state(1)?;
///
/// assert_eq!(machine.current_state_key(), Some(1));
/// # Ok::<(), viewstate::core::MachineError>(())
/// ```
pub struct StateMachine<X: StateExecutor> {
    current_state_key: Option<StateKey>,
    states: HashMap<StateKey, State<X::Effects>>,
    config: Config,
    started: bool,
    executor: X,
}

impl<X: StateExecutor> StateMachine<X> {
    /// Create an empty, unstarted machine around an executor.
    pub fn new(executor: X) -> Self {
        Self {
            current_state_key: None,
            states: HashMap::new(),
            config: Config::default(),
            started: false,
            executor,
        }
    }

    /// A fresh state with default effects for this machine variant.
    pub fn new_state_instance(&self) -> State<X::Effects> {
        State::default()
    }

    /// Machine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable machine configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Mutate the configuration through a closure.
    pub fn configure<F>(&mut self, configure: F) -> Result<&mut Self, MachineError>
    where
        F: FnOnce(&mut Config) -> Result<(), MachineError>,
    {
        configure(&mut self.config)?;
        Ok(self)
    }

    /// Executor applying state effects.
    pub fn executor(&self) -> &X {
        &self.executor
    }

    /// Mutable access to the executor.
    pub fn executor_mut(&mut self) -> &mut X {
        &mut self.executor
    }

    /// Current key, falling back to the configured initial state.
    pub fn current_state_key(&self) -> Option<StateKey> {
        self.current_state_key.or(self.config.initial_state())
    }

    /// Whether `start()` ran since creation or the last `shutdown()`.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no state is registered.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Register `state` under `key`, replacing any previous entry.
    pub fn add_state(
        &mut self,
        key: impl Into<StateKey>,
        state: State<X::Effects>,
    ) -> Result<&mut Self, MachineError> {
        if self.started {
            return Err(MachineError::InvalidOperation("Machine already started"));
        }

        let key = key.into();
        if key < 0 {
            return Err(MachineError::InvalidKey(key));
        }

        self.states.insert(key, state);
        Ok(self)
    }

    /// Build a state from `new_state_instance()` and register it.
    pub fn state<F>(
        &mut self,
        key: impl Into<StateKey>,
        configure: F,
    ) -> Result<&mut Self, MachineError>
    where
        F: FnOnce(State<X::Effects>) -> State<X::Effects>,
    {
        let state = configure(self.new_state_instance());
        self.add_state(key, state)
    }

    /// Start the machine, entering the restored or initial state if any.
    ///
    /// With neither a restored key nor an initial state the machine is started
    /// but no state is entered.
    pub fn start(&mut self) -> Result<(), MachineError> {
        if self.started {
            return Err(MachineError::InvalidOperation("Machine already started"));
        }

        self.started = true;

        let Some(key) = self.current_state_key() else {
            debug!("State machine started without an initial state");
            return Ok(());
        };

        if !self.states.contains_key(&key) {
            return Err(MachineError::InvalidState(key));
        }

        debug!(key, states = self.states.len(), "Starting state machine");
        self.change_state_with(key, true, None)
    }

    /// Reset the machine: drop all states, the current key and the
    /// configuration, and mark it as not started.
    pub fn shutdown(&mut self) {
        self.states.clear();
        self.started = false;
        self.current_state_key = None;
        self.config.reset();
        debug!("State machine shut down");
    }

    /// Change to `key` unless it is already current.
    pub fn change_state(&mut self, key: impl Into<StateKey>) -> Result<(), MachineError> {
        self.change_state_with(key, false, None)
    }

    /// Change to `key` even if it is already current.
    pub fn force_change_state(&mut self, key: impl Into<StateKey>) -> Result<(), MachineError> {
        self.change_state_with(key, true, None)
    }

    /// Change to `key`.
    ///
    /// `on_change` replaces the configured change callback for this call only.
    /// When `force` is false, changing to the current key does nothing.
    pub fn change_state_with(
        &mut self,
        key: impl Into<StateKey>,
        force: bool,
        on_change: Option<OnChangeState>,
    ) -> Result<(), MachineError> {
        if !self.started {
            return Err(MachineError::InvalidOperation(
                "Call start() before making any state changes",
            ));
        }

        let key = key.into();
        let previous_key = self.current_state_key();
        if previous_key == Some(key) && !force {
            return Ok(());
        }

        let Some(state) = self.states.get(&key) else {
            return Err(MachineError::InvalidState(key));
        };

        debug!(from = ?previous_key, to = key, forced = force, "Changing state");

        if let Some(callback) = on_change.as_ref().or(self.config.on_change_state()) {
            callback(key);
        }

        if previous_key != Some(key) {
            let exit = previous_key
                .and_then(|previous| self.states.get(&previous))
                .and_then(|previous| previous.exit());
            if let Some(exit) = exit {
                exit();
            }
        }

        self.executor.perform_change_state(state);

        if let Some(enter) = state.enter() {
            enter();
        }

        self.current_state_key = Some(key);
        Ok(())
    }

    /// Snapshot the current key.
    pub fn save_instance_state(&self) -> InstanceState {
        let mut saved = InstanceState::new();
        saved.put_int(STATE_MACHINE_CURRENT_KEY, self.current_state_key().unwrap_or(-1));
        saved
    }

    /// Restore the current key saved by [`save_instance_state`](Self::save_instance_state).
    ///
    /// Must be called before `start()`. `None`, or a bundle without the key
    /// field, leaves the machine unchanged.
    pub fn restore_instance_state(
        &mut self,
        saved: Option<&InstanceState>,
    ) -> Result<&mut Self, MachineError> {
        if self.started {
            return Err(MachineError::InvalidOperation("Machine already started"));
        }

        let Some(saved) = saved else {
            return Ok(self);
        };

        if let Some(key) = saved.get_int(STATE_MACHINE_CURRENT_KEY) {
            self.current_state_key = (key >= 0).then_some(key);
            debug!(key, "Restored state machine key");
        }
        Ok(self)
    }
}

impl<X: StateExecutor + Default> Default for StateMachine<X> {
    fn default() -> Self {
        Self::new(X::default())
    }
}
