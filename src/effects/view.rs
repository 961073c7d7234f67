//! Visibility-based state machine.
//!
//! Each state declares which views become gone, visible or invisible, and
//! which become enabled or disabled. Views are referenced either directly,
//! through weak handles, or by id, resolved against the executor's root.

use super::machine::StateMachine;
use crate::core::{State, StateExecutor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Identifier used to look a view up in a [`ViewRoot`].
pub type ViewId = u32;

/// Visibility of a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Shown and taking up space
    Visible,
    /// Hidden but still taking up space
    Invisible,
    /// Hidden and taking no space
    Gone,
}

/// A view of the host UI toolkit.
pub trait View: Send + Sync {
    fn set_visibility(&self, visibility: Visibility);

    fn set_enabled(&self, enabled: bool);

    /// Inflate this view if it is a placeholder stub, returning the real view.
    ///
    /// Ordinary views return `None`.
    fn inflate_stub(&self) -> Option<Arc<dyn View>> {
        None
    }
}

/// Root of a view tree, able to resolve views by id.
pub trait ViewRoot: Send + Sync {
    fn find_view(&self, id: ViewId) -> Option<Arc<dyn View>>;
}

/// Non-owning reference to a view.
///
/// States never keep views alive: once the UI drops a view its handle
/// dangles and is skipped.
#[derive(Clone)]
pub struct ViewHandle(Weak<dyn View>);

impl ViewHandle {
    pub fn from_dyn(view: &Arc<dyn View>) -> Self {
        Self(Arc::downgrade(view))
    }

    pub fn get(&self) -> Option<Arc<dyn View>> {
        self.0.upgrade()
    }
}

impl<V: View + 'static> From<&Arc<V>> for ViewHandle {
    fn from(view: &Arc<V>) -> Self {
        let view: Arc<dyn View> = view.clone();
        Self(Arc::downgrade(&view))
    }
}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewHandle")
            .field(&if self.get().is_some() { "alive" } else { "dropped" })
            .finish()
    }
}

/// Views touched by one state, split by effect.
#[derive(Clone, Debug, Default)]
pub struct ViewEffects {
    gones: Vec<ViewHandle>,
    visibles: Vec<ViewHandle>,
    invisibles: Vec<ViewHandle>,
    enables: Vec<ViewHandle>,
    disables: Vec<ViewHandle>,
    gone_ids: BTreeSet<ViewId>,
    visible_ids: BTreeSet<ViewId>,
    invisible_ids: BTreeSet<ViewId>,
    enable_ids: BTreeSet<ViewId>,
    disable_ids: BTreeSet<ViewId>,
}

macro_rules! view_effect {
    ($(#[$doc:meta])* $handles:ident, $by_id:ident, $ids:ident) => {
        $(#[$doc])*
        pub fn $handles<I>(mut self, views: I) -> Self
        where
            I: IntoIterator,
            I::Item: Into<ViewHandle>,
        {
            self.$handles.extend(views.into_iter().map(Into::into));
            self
        }

        $(#[$doc])*
        ///
        /// Ids are resolved against the executor's root when the state is entered.
        pub fn $by_id<I>(mut self, ids: I) -> Self
        where
            I: IntoIterator<Item = ViewId>,
        {
            self.$ids.extend(ids);
            self
        }
    };
}

impl ViewEffects {
    view_effect!(
        /// Views shown when the state is entered.
        visibles, visibles_by_id, visible_ids
    );
    view_effect!(
        /// Views hidden, keeping their space, when the state is entered.
        invisibles, invisibles_by_id, invisible_ids
    );
    view_effect!(
        /// Views hidden, releasing their space, when the state is entered.
        gones, gones_by_id, gone_ids
    );
    view_effect!(
        /// Views enabled when the state is entered.
        enables, enables_by_id, enable_ids
    );
    view_effect!(
        /// Views disabled when the state is entered.
        disables, disables_by_id, disable_ids
    );

    pub fn is_empty(&self) -> bool {
        self.gones.is_empty()
            && self.visibles.is_empty()
            && self.invisibles.is_empty()
            && self.enables.is_empty()
            && self.disables.is_empty()
            && self.gone_ids.is_empty()
            && self.visible_ids.is_empty()
            && self.invisible_ids.is_empty()
            && self.enable_ids.is_empty()
            && self.disable_ids.is_empty()
    }
}

/// Builder-style access to view effects directly on a state.
impl State<ViewEffects> {
    pub fn visibles<I>(self, views: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ViewHandle>,
    {
        self.with_effects(|e| e.visibles(views))
    }

    pub fn invisibles<I>(self, views: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ViewHandle>,
    {
        self.with_effects(|e| e.invisibles(views))
    }

    pub fn gones<I>(self, views: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ViewHandle>,
    {
        self.with_effects(|e| e.gones(views))
    }

    pub fn enables<I>(self, views: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ViewHandle>,
    {
        self.with_effects(|e| e.enables(views))
    }

    pub fn disables<I>(self, views: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ViewHandle>,
    {
        self.with_effects(|e| e.disables(views))
    }

    pub fn visibles_by_id(self, ids: impl IntoIterator<Item = ViewId>) -> Self {
        self.with_effects(|e| e.visibles_by_id(ids))
    }

    pub fn invisibles_by_id(self, ids: impl IntoIterator<Item = ViewId>) -> Self {
        self.with_effects(|e| e.invisibles_by_id(ids))
    }

    pub fn gones_by_id(self, ids: impl IntoIterator<Item = ViewId>) -> Self {
        self.with_effects(|e| e.gones_by_id(ids))
    }

    pub fn enables_by_id(self, ids: impl IntoIterator<Item = ViewId>) -> Self {
        self.with_effects(|e| e.enables_by_id(ids))
    }

    pub fn disables_by_id(self, ids: impl IntoIterator<Item = ViewId>) -> Self {
        self.with_effects(|e| e.disables_by_id(ids))
    }
}

/// Executor toggling visibility and enablement.
#[derive(Default)]
pub struct ViewExecutor {
    root: Option<Weak<dyn ViewRoot>>,
}

impl ViewExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor resolving id references against `root`.
    pub fn with_root<R: ViewRoot + 'static>(root: &Arc<R>) -> Self {
        let mut executor = Self::new();
        executor.set_root(root);
        executor
    }

    pub fn set_root<R: ViewRoot + 'static>(&mut self, root: &Arc<R>) {
        let root: Arc<dyn ViewRoot> = root.clone();
        self.root = Some(Arc::downgrade(&root));
    }

    pub fn clear_root(&mut self) {
        self.root = None;
    }

    pub fn has_root(&self) -> bool {
        self.root.as_ref().is_some_and(|root| root.strong_count() > 0)
    }

    fn apply_handles(handles: &[ViewHandle], apply: impl Fn(&dyn View)) {
        for handle in handles {
            match handle.get() {
                Some(view) => apply(view.as_ref()),
                None => trace!("Skipping dropped view"),
            }
        }
    }

    fn apply_ids(root: &dyn ViewRoot, ids: &BTreeSet<ViewId>, apply: impl Fn(Arc<dyn View>)) {
        for &id in ids {
            match root.find_view(id) {
                Some(view) => apply(view),
                None => trace!(id, "Skipping unknown view id"),
            }
        }
    }
}

impl StateExecutor for ViewExecutor {
    type Effects = ViewEffects;

    fn perform_change_state(&mut self, state: &State<ViewEffects>) {
        let effects = state.effects();

        Self::apply_handles(&effects.gones, |v| v.set_visibility(Visibility::Gone));
        Self::apply_handles(&effects.visibles, |v| v.set_visibility(Visibility::Visible));
        Self::apply_handles(&effects.invisibles, |v| v.set_visibility(Visibility::Invisible));
        Self::apply_handles(&effects.enables, |v| v.set_enabled(true));
        Self::apply_handles(&effects.disables, |v| v.set_enabled(false));

        let Some(root) = self.root.as_ref().and_then(Weak::upgrade) else {
            return;
        };

        Self::apply_ids(root.as_ref(), &effects.gone_ids, |v| {
            v.set_visibility(Visibility::Gone)
        });
        Self::apply_ids(root.as_ref(), &effects.visible_ids, |v| {
            let view = v.inflate_stub().unwrap_or(v);
            view.set_visibility(Visibility::Visible);
        });
        Self::apply_ids(root.as_ref(), &effects.invisible_ids, |v| {
            v.set_visibility(Visibility::Invisible)
        });
        Self::apply_ids(root.as_ref(), &effects.enable_ids, |v| v.set_enabled(true));
        Self::apply_ids(root.as_ref(), &effects.disable_ids, |v| v.set_enabled(false));
    }
}

/// State machine toggling view visibility and enablement.
pub type ViewStateMachine = StateMachine<ViewExecutor>;
