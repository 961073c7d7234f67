//! State definitions for keyed state machines.
//!
//! A `State` is a declarative bundle of UI effects plus optional enter and
//! exit callbacks. The effects payload is owned by the executor variant, so a
//! visibility machine and a scene machine share the same registry logic.

use std::fmt;
use std::sync::Arc;

/// Key identifying a state inside a machine.
///
/// Valid keys are non-negative. Negative keys are rejected when a state is
/// registered or configured as the initial state.
pub type StateKey = i32;

/// Callback invoked when a state is entered or exited.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Callback invoked with the target key every time the machine changes state.
pub type OnChangeState = Arc<dyn Fn(StateKey) + Send + Sync>;

/// A machine state: effects to apply plus optional lifecycle callbacks.
///
/// # Example
///
/// ```rust
/// use viewstate::core::State;
///
/// #[derive(Default)]
/// struct Label(&'static str);
///
/// let state = State::new(Label("loading"))
///     .on_enter(|| println!("entered"))
///     .on_exit(|| println!("left"));
///
/// assert!(state.enter().is_some());
/// assert_eq!(state.effects().0, "loading");
/// ```
pub struct State<E> {
    effects: E,
    enter: Option<Callback>,
    exit: Option<Callback>,
}

impl<E> State<E> {
    /// Create a state around an effects payload, without callbacks.
    pub fn new(effects: E) -> Self {
        Self {
            effects,
            enter: None,
            exit: None,
        }
    }

    /// Set the callback run after this state's effects are applied.
    pub fn on_enter<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.enter = Some(Arc::new(callback));
        self
    }

    /// Set the callback run when the machine leaves this state for another.
    pub fn on_exit<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.exit = Some(Arc::new(callback));
        self
    }

    pub fn enter(&self) -> Option<&Callback> {
        self.enter.as_ref()
    }

    pub fn exit(&self) -> Option<&Callback> {
        self.exit.as_ref()
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    /// Rewrite the effects payload in builder style.
    pub fn with_effects<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(E) -> E,
    {
        self.effects = configure(self.effects);
        self
    }
}

impl<E: Default> Default for State<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E: Clone> Clone for State<E> {
    fn clone(&self) -> Self {
        Self {
            effects: self.effects.clone(),
            enter: self.enter.clone(),
            exit: self.exit.clone(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for State<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("effects", &self.effects)
            .field("has_enter", &self.enter.is_some())
            .field("has_exit", &self.exit.is_some())
            .finish()
    }
}
