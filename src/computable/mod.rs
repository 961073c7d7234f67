//! Values computed lazily on a worker thread while they are observed.
//!
//! A [`ComputableValue`] wraps a [`Compute`] implementation and a
//! [`LiveValue`]. Gaining the first observer starts a computation on a worker
//! thread; results are posted to the observers as they are produced.
//!
//! # Concurrency
//!
//! - At most one computation body runs at a time per value
//! - Status queries are lock-free
//! - `interrupt()` is cooperative: the worker observes it through
//!   [`ComputeScope::is_interrupted`] and [`ComputeScope::sleep`], and values it
//!   posts afterwards are dropped

mod error;
mod holder;
mod live;

pub use error::ComputeError;
pub use holder::{ComputableValue, Compute, ComputeScope, ComputeStatus, WORKER_THREAD_NAME};
pub use live::{LiveValue, ObserverId};
