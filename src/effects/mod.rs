//! State machines applying effects to a host UI.
//!
//! This module is the imperative shell around the core types: the keyed
//! registry that decides when a state becomes active, and the two executor
//! variants that decide what entering a state does to the UI.
//!
//! - [`ViewStateMachine`]: toggles view visibility and enablement
//! - [`SceneStateMachine`]: enters scenes, optionally animated

mod machine;
mod scene;
mod view;

pub use machine::StateMachine;
pub use scene::{
    LayoutId, Scene, SceneContainer, SceneEffects, SceneExecutor, SceneStateMachine,
    SceneTransition, TransitionManager,
};
pub use view::{
    View, ViewEffects, ViewExecutor, ViewHandle, ViewId, ViewRoot, ViewStateMachine, Visibility,
};
