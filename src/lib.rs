//! Viewstate: keyed UI state machines and lazily computed observable values
//!
//! The crate provides two small UI building blocks, independent of any
//! particular toolkit. The host UI is reached through a handful of traits
//! (`View`, `ViewRoot`, `Scene`, `TransitionManager`, ...) so any toolkit,
//! or a test double, can be plugged in.
//!
//! # Core Concepts
//!
//! - **State**: declarative UI effects plus optional enter/exit callbacks
//! - **State machine**: a registry of states keyed by integer, moving between
//!   them on request and applying each state's effects through an executor
//! - **Computable value**: an observable value computed on a worker thread
//!   only while somebody observes it
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use viewstate::effects::{View, ViewStateMachine, Visibility};
//!
//! #[derive(Default)]
//! struct Spinner {
//!     shown: AtomicBool,
//! }
//!
//! impl View for Spinner {
//!     fn set_visibility(&self, visibility: Visibility) {
//!         self.shown.store(visibility == Visibility::Visible, Ordering::SeqCst);
//!     }
//!
//!     fn set_enabled(&self, _enabled: bool) {}
//! }
//!
//! let spinner = Arc::new(Spinner::default());
//! let mut machine = ViewStateMachine::default();
//! machine
//!     .state(0, |s| s.visibles([&spinner]))?
//!     .state(1, |s| s.gones([&spinner]))?;
//! machine.config_mut().set_initial_state(0)?;
//! machine.start()?;
//! assert!(spinner.shown.load(Ordering::SeqCst));
//!
//! machine.change_state(1)?;
//! assert!(!spinner.shown.load(Ordering::SeqCst));
//! # Ok::<(), viewstate::core::MachineError>(())
//! ```

pub mod checkpoint;
pub mod computable;
pub mod core;
pub mod effects;
mod macros;

// Re-export commonly used types
pub use crate::checkpoint::InstanceState;
pub use crate::computable::{ComputableValue, Compute, ComputeError, LiveValue};
pub use crate::core::{Config, MachineError, State, StateExecutor, StateKey};
pub use crate::effects::{SceneStateMachine, StateMachine, ViewStateMachine};
