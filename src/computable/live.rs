//! Observable value holder.

use parking_lot::{Mutex, ReentrantMutex};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifier returned by [`LiveValue::observe`].
pub type ObserverId = u64;

struct Observer<T> {
    id: ObserverId,
    callback: Box<dyn Fn(&T) + Send + Sync>,
    /// Version last delivered. Held across the callback, so deliveries to one
    /// observer never overlap; reentrant for observers that post themselves.
    delivered: ReentrantMutex<Cell<u64>>,
}

impl<T> Observer<T> {
    fn new(id: ObserverId, callback: Box<dyn Fn(&T) + Send + Sync>) -> Self {
        Self {
            id,
            callback,
            delivered: ReentrantMutex::new(Cell::new(0)),
        }
    }

    /// Call the observer unless it already saw `version` or a newer one.
    fn deliver(&self, version: u64, value: &T) {
        let delivered = self.delivered.lock();
        if version <= delivered.get() {
            return;
        }
        delivered.set(version);
        (self.callback)(value);
    }
}

struct Inner<T> {
    value: Option<T>,
    version: u64,
    observers: Vec<Arc<Observer<T>>>,
}

/// A value that notifies its observers whenever a new value is posted.
///
/// New observers immediately receive the current value, if any. Observers are
/// called on the thread that posts the value, outside the internal lock. Each
/// observer sees values in posting order: a value that loses a race against a
/// newer one is skipped for that observer rather than delivered late.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use viewstate::computable::LiveValue;
///
/// let live = LiveValue::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// live.observe(move |v: &u32| sink.lock().unwrap().push(*v));
/// live.post_value(1);
/// live.post_value(2);
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// ```
pub struct LiveValue<T> {
    inner: Mutex<Inner<T>>,
    next_id: AtomicU64,
}

impl<T: Clone + Send + 'static> LiveValue<T> {
    /// Empty value with no observers.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                value: None,
                version: 0,
                observers: Vec::new(),
            }),
            next_id: AtomicU64::new(0),
        }
    }

    /// Value holding `value` as its first version.
    pub fn with_value(value: T) -> Self {
        let live = Self::new();
        {
            let mut inner = live.inner.lock();
            inner.value = Some(value);
            inner.version = 1;
        }
        live
    }

    /// Latest posted value.
    pub fn value(&self) -> Option<T> {
        self.inner.lock().value.clone()
    }

    /// Number of values posted so far.
    pub fn version(&self) -> u64 {
        self.inner.lock().version
    }

    /// Store `value` and notify every observer.
    pub fn post_value(&self, value: T) {
        let (version, observers) = {
            let mut inner = self.inner.lock();
            inner.value = Some(value.clone());
            inner.version += 1;
            (inner.version, inner.observers.clone())
        };

        for observer in observers {
            observer.deliver(version, &value);
        }
    }

    /// Register an observer and return its id.
    pub fn observe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.add_observer(observer).0
    }

    /// Register an observer, also reporting whether it is the first one.
    pub(crate) fn add_observer<F>(&self, observer: F) -> (ObserverId, bool)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let observer = Arc::new(Observer::new(id, Box::new(observer)));

        let (activated, current) = {
            let mut inner = self.inner.lock();
            let activated = inner.observers.is_empty();
            inner.observers.push(Arc::clone(&observer));
            let current = inner.value.clone().map(|value| (inner.version, value));
            (activated, current)
        };

        if let Some((version, value)) = current {
            observer.deliver(version, &value);
        }
        (id, activated)
    }

    /// Remove an observer. Returns false when `id` is unknown.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.observers.len();
        inner.observers.retain(|observer| observer.id != id);
        inner.observers.len() != before
    }

    /// Remove every observer.
    pub fn remove_observers(&self) {
        self.inner.lock().observers.clear();
    }

    /// Whether anyone observes the value.
    pub fn has_observers(&self) -> bool {
        !self.inner.lock().observers.is_empty()
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.inner.lock().observers.len()
    }
}

impl<T: Clone + Send + 'static> Default for LiveValue<T> {
    fn default() -> Self {
        Self::new()
    }
}
