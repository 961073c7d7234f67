//! Strategy trait applying a state's effects to the UI.

use super::state::State;

/// Applies the declarative effects of a [`State`] to the host UI.
///
/// Each machine variant supplies one implementation at construction time:
/// the registry decides *when* a state becomes active, the executor decides
/// *what* that means for the UI.
///
/// # Example
///
/// ```rust
/// use viewstate::core::{State, StateExecutor};
///
/// #[derive(Default)]
/// struct Title(String);
///
/// #[derive(Default)]
/// struct TitleExecutor {
///     shown: Vec<String>,
/// }
///
/// impl StateExecutor for TitleExecutor {
///     type Effects = Title;
///
///     fn perform_change_state(&mut self, state: &State<Title>) {
///         self.shown.push(state.effects().0.clone());
///     }
/// }
/// ```
pub trait StateExecutor {
    /// Effects payload carried by every state of this machine variant.
    type Effects: Default;

    /// Apply `state`'s effects. Called once per state change, between the
    /// previous state's exit callback and the new state's enter callback.
    fn perform_change_state(&mut self, state: &State<Self::Effects>);
}
