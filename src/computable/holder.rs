//! Lazily computed observable value.

use super::error::ComputeError;
use super::live::{LiveValue, ObserverId};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, Thread};
use std::time::{Duration, Instant};
use tracing::{debug, error, trace, warn};

/// Name of the threads running computations.
pub const WORKER_THREAD_NAME: &str = "computable-worker";

// Longest single park in `ComputeScope::sleep`. A worker superseded before its
// thread handle is registered is never unparked.
const MAX_PARK: Duration = Duration::from_millis(50);

/// A computation producing values for a [`ComputableValue`].
pub trait Compute<T>: Send + Sync + 'static {
    /// Produce values, publishing each through `scope.post_value`.
    ///
    /// Runs on a worker thread. Long computations should check
    /// `scope.is_interrupted()` or wait with `scope.sleep()`.
    fn compute(&self, scope: &ComputeScope<'_, T>) -> Result<(), ComputeError>;

    /// Cancel external work tied to the running computation.
    ///
    /// Called once per `interrupt()`, on the interrupting thread.
    fn abort(&self);
}

/// Status of a computable value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComputeStatus {
    /// Nothing computed and nothing running
    Idle,
    /// A worker is scheduled or running
    Computing,
    /// The last computation succeeded
    Computed,
}

impl ComputeStatus {
    fn bits(self) -> u64 {
        match self {
            Self::Idle => 0,
            Self::Computing => 1,
            Self::Computed => 2,
        }
    }

    fn from_bits(bits: u64) -> Self {
        match bits & STATUS_MASK {
            1 => Self::Computing,
            2 => Self::Computed,
            _ => Self::Idle,
        }
    }
}

const STATUS_BITS: u32 = 2;
const STATUS_MASK: u64 = (1 << STATUS_BITS) - 1;

/// Status plus the generation of the worker it belongs to, packed into one
/// atomic word so a worker can only finish the cycle it was launched for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Phase {
    generation: u64,
    status: ComputeStatus,
}

impl Phase {
    fn pack(self) -> u64 {
        (self.generation << STATUS_BITS) | self.status.bits()
    }

    fn unpack(word: u64) -> Self {
        Self {
            generation: word >> STATUS_BITS,
            status: ComputeStatus::from_bits(word),
        }
    }

    fn next_generation(self) -> u64 {
        self.generation.wrapping_add(1) & (u64::MAX >> STATUS_BITS)
    }

    fn invalidated(self, has_observers: bool) -> Option<Self> {
        match self.status {
            ComputeStatus::Computing => None,
            ComputeStatus::Computed if !has_observers => Some(Self {
                generation: self.generation,
                status: ComputeStatus::Idle,
            }),
            _ => Some(Self {
                generation: self.next_generation(),
                status: ComputeStatus::Computing,
            }),
        }
    }

    fn interrupted(self) -> Self {
        Self {
            generation: self.next_generation(),
            status: ComputeStatus::Idle,
        }
    }
}

#[derive(Default)]
struct WorkerSignal {
    interrupted: AtomicBool,
    thread: Mutex<Option<Thread>>,
}

impl WorkerSignal {
    fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.lock().as_ref() {
            thread.unpark();
        }
    }
}

struct Shared<T> {
    live: LiveValue<T>,
    computation: Box<dyn Compute<T>>,
    lock: Mutex<()>,
    phase: AtomicU64,
    worker: Mutex<Option<Weak<WorkerSignal>>>,
    last_error: Mutex<Option<ComputeError>>,
}

impl<T: Clone + Send + 'static> Shared<T> {
    fn phase(&self) -> Phase {
        Phase::unpack(self.phase.load(Ordering::SeqCst))
    }

    fn execute(&self, generation: u64, signal: &WorkerSignal) {
        let _guard = self.lock.lock();

        let running = Phase {
            generation,
            status: ComputeStatus::Computing,
        };
        if self.phase() != running {
            trace!(generation, "Skipping superseded compute worker");
            return;
        }

        let scope = ComputeScope {
            shared: self,
            generation,
            signal,
        };
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.computation.compute(&scope)))
            .unwrap_or_else(|payload| Err(ComputeError::Panicked(panic_message(payload))));

        let finished = Phase {
            generation,
            status: if result.is_ok() {
                ComputeStatus::Computed
            } else {
                ComputeStatus::Idle
            },
        };
        let committed = self
            .phase
            .compare_exchange(
                running.pack(),
                finished.pack(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();

        if !committed {
            debug!(generation, "Compute worker finished after being superseded");
            return;
        }

        match result {
            Ok(()) => {
                debug!(generation, "Computation finished");
                *self.last_error.lock() = None;
            }
            Err(e) => {
                warn!(generation, error = %e, "Computation failed");
                *self.last_error.lock() = Some(e);
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Handle given to a running computation.
pub struct ComputeScope<'a, T> {
    shared: &'a Shared<T>,
    generation: u64,
    signal: &'a WorkerSignal,
}

impl<T: Clone + Send + 'static> ComputeScope<'_, T> {
    /// Publish a value to the holder's observers.
    ///
    /// Returns false, without publishing, once this computation has been
    /// interrupted or superseded.
    pub fn post_value(&self, value: T) -> bool {
        if self.is_interrupted() {
            return false;
        }
        self.shared.live.post_value(value);
        true
    }

    /// Whether this computation should stop.
    pub fn is_interrupted(&self) -> bool {
        self.signal.interrupted.load(Ordering::SeqCst)
            || self.shared.phase().generation != self.generation
    }

    /// Wait for `duration`, returning early with `ComputeError::Interrupted`
    /// when the computation is interrupted.
    ///
    /// A duration too large to form a deadline, such as `Duration::MAX`,
    /// waits until interrupted.
    pub fn sleep(&self, duration: Duration) -> Result<(), ComputeError> {
        let deadline = Instant::now().checked_add(duration);
        loop {
            if self.is_interrupted() {
                return Err(ComputeError::Interrupted);
            }
            let wait = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(());
                    }
                    (deadline - now).min(MAX_PARK)
                }
                None => MAX_PARK,
            };
            thread::park_timeout(wait);
        }
    }
}

struct FnCompute<C, A> {
    compute: C,
    abort: A,
}

impl<T, C, A> Compute<T> for FnCompute<C, A>
where
    C: Fn(&ComputeScope<'_, T>) -> Result<(), ComputeError> + Send + Sync + 'static,
    A: Fn() + Send + Sync + 'static,
{
    fn compute(&self, scope: &ComputeScope<'_, T>) -> Result<(), ComputeError> {
        (self.compute)(scope)
    }

    fn abort(&self) {
        (self.abort)()
    }
}

/// Observable value computed on a worker thread while it is observed.
///
/// The first observer triggers a computation unless a value was already
/// computed. `invalidate()` discards the value and recomputes; without
/// observers the recomputation is deferred until the next observer arrives.
/// At most one computation body runs at a time.
///
/// Cloning returns another handle to the same value.
///
/// # Example
///
/// ```rust
/// use std::sync::mpsc;
/// use viewstate::computable::ComputableValue;
///
/// let value = ComputableValue::from_fn(
///     |scope| {
///         scope.post_value(42u32);
///         Ok(())
///     },
///     || {},
/// );
///
/// let (tx, rx) = mpsc::channel();
/// let tx = std::sync::Mutex::new(tx);
/// value.observe(move |v: &u32| {
///     let _ = tx.lock().unwrap().send(*v);
/// });
///
/// assert_eq!(rx.recv().unwrap(), 42);
/// ```
pub struct ComputableValue<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for ComputableValue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> ComputableValue<T> {
    pub fn new<C: Compute<T>>(computation: C) -> Self {
        Self {
            shared: Arc::new(Shared {
                live: LiveValue::new(),
                computation: Box::new(computation),
                lock: Mutex::new(()),
                phase: AtomicU64::new(
                    Phase {
                        generation: 0,
                        status: ComputeStatus::Idle,
                    }
                    .pack(),
                ),
                worker: Mutex::new(None),
                last_error: Mutex::new(None),
            }),
        }
    }

    /// Holder backed by closures for `compute` and `abort`.
    pub fn from_fn<C, A>(compute: C, abort: A) -> Self
    where
        C: Fn(&ComputeScope<'_, T>) -> Result<(), ComputeError> + Send + Sync + 'static,
        A: Fn() + Send + Sync + 'static,
    {
        Self::new(FnCompute { compute, abort })
    }

    /// Current phase of the holder.
    pub fn status(&self) -> ComputeStatus {
        self.shared.phase().status
    }

    /// Whether a computation is scheduled or running.
    pub fn is_running(&self) -> bool {
        self.status() == ComputeStatus::Computing
    }

    /// Whether the last computation completed and is still valid.
    pub fn has_computed(&self) -> bool {
        self.status() == ComputeStatus::Computed
    }

    /// Either running or computed.
    pub fn is_running_or_has_computed(&self) -> bool {
        self.status() != ComputeStatus::Idle
    }

    /// Latest published value.
    pub fn value(&self) -> Option<T> {
        self.shared.live.value()
    }

    /// Error of the last computation that failed, cleared by a success.
    pub fn last_error(&self) -> Option<ComputeError> {
        self.shared.last_error.lock().clone()
    }

    /// Register an observer, computing the value if this is the first one and
    /// nothing was computed yet.
    pub fn observe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let (id, activated) = self.shared.live.add_observer(observer);
        if activated && !self.has_computed() {
            self.invalidate();
        }
        id
    }

    /// Remove an observer. Returns false when `id` is unknown.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.shared.live.remove_observer(id)
    }

    /// Remove every observer. A computed value stays computed.
    pub fn remove_observers(&self) {
        self.shared.live.remove_observers();
    }

    /// Whether anyone observes the value.
    pub fn has_observers(&self) -> bool {
        self.shared.live.has_observers()
    }

    /// Discard the computed value and compute again.
    ///
    /// Without observers a computed value is only marked stale. While a
    /// computation is running this does nothing.
    pub fn invalidate(&self) {
        let has_observers = self.has_observers();
        let previous = self
            .shared
            .phase
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |word| {
                Phase::unpack(word).invalidated(has_observers).map(Phase::pack)
            });

        let Ok(previous) = previous else {
            trace!("Invalidate ignored, computation already running");
            return;
        };

        if let Some(next) = Phase::unpack(previous).invalidated(has_observers) {
            if next.status == ComputeStatus::Computing {
                self.launch(next.generation);
            }
        }
    }

    /// Stop the running computation, call `abort()` and reset to idle.
    ///
    /// Values posted by the interrupted computation afterwards are dropped.
    pub fn interrupt(&self) {
        let previous = self
            .shared
            .phase
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |word| {
                Some(Phase::unpack(word).interrupted().pack())
            });
        if let Ok(previous) = previous {
            debug!(generation = Phase::unpack(previous).generation, "Interrupting computation");
        }

        let signal = self.shared.worker.lock().take();
        if let Some(signal) = signal.and_then(|weak| weak.upgrade()) {
            signal.interrupt();
        }

        self.shared.computation.abort();
    }

    fn launch(&self, generation: u64) {
        let signal = Arc::new(WorkerSignal::default());
        let worker_signal = Arc::clone(&signal);
        let shared = Arc::clone(&self.shared);

        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || shared.execute(generation, &worker_signal));

        match spawned {
            Ok(handle) => {
                *signal.thread.lock() = Some(handle.thread().clone());
                *self.shared.worker.lock() = Some(Arc::downgrade(&signal));
                debug!(generation, "Launched compute worker");
            }
            Err(e) => {
                error!(generation, error = %e, "Failed to spawn compute worker");
                let running = Phase {
                    generation,
                    status: ComputeStatus::Computing,
                };
                let idle = Phase {
                    generation,
                    status: ComputeStatus::Idle,
                };
                let _ = self.shared.phase.compare_exchange(
                    running.pack(),
                    idle.pack(),
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                );
                *self.shared.last_error.lock() = Some(ComputeError::failed(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc::{self, Receiver, Sender};

    fn wait_until(condition: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        condition()
    }

    #[derive(Default)]
    struct Counters {
        computes: AtomicUsize,
        aborts: AtomicUsize,
    }

    impl Counters {
        fn computes(&self) -> usize {
            self.computes.load(Ordering::SeqCst)
        }

        fn aborts(&self) -> usize {
            self.aborts.load(Ordering::SeqCst)
        }
    }

    /// Counts calls and posts the call number.
    struct Counting(Arc<Counters>);

    impl Compute<usize> for Counting {
        fn compute(&self, scope: &ComputeScope<'_, usize>) -> Result<(), ComputeError> {
            let n = self.0.computes.fetch_add(1, Ordering::SeqCst) + 1;
            scope.post_value(n);
            Ok(())
        }

        fn abort(&self) {
            self.0.aborts.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Blocks until released through the channel, or until interrupted.
    struct Gated {
        counters: Arc<Counters>,
        release: Mutex<Receiver<()>>,
        started: Mutex<Sender<()>>,
    }

    impl Compute<usize> for Gated {
        fn compute(&self, scope: &ComputeScope<'_, usize>) -> Result<(), ComputeError> {
            self.counters.computes.fetch_add(1, Ordering::SeqCst);
            let _ = self.started.lock().send(());
            loop {
                if self.release.lock().try_recv().is_ok() {
                    break;
                }
                scope.sleep(Duration::from_millis(2))?;
            }
            scope.post_value(1);
            Ok(())
        }

        fn abort(&self) {
            self.counters.aborts.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn gated() -> (ComputableValue<usize>, Arc<Counters>, Sender<()>, Receiver<()>) {
        let counters = Arc::new(Counters::default());
        let (release_tx, release_rx) = mpsc::channel();
        let (started_tx, started_rx) = mpsc::channel();
        let value = ComputableValue::new(Gated {
            counters: Arc::clone(&counters),
            release: Mutex::new(release_rx),
            started: Mutex::new(started_tx),
        });
        (value, counters, release_tx, started_rx)
    }

    fn counting() -> (ComputableValue<usize>, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        (ComputableValue::new(Counting(Arc::clone(&counters))), counters)
    }

    #[test]
    fn phase_packs_generation_and_status() {
        let phase = Phase {
            generation: 41,
            status: ComputeStatus::Computed,
        };

        assert_eq!(Phase::unpack(phase.pack()), phase);
        assert_eq!(phase.interrupted().status, ComputeStatus::Idle);
        assert_eq!(phase.interrupted().generation, 42);
    }

    #[test]
    fn invalidate_rules() {
        let idle = Phase {
            generation: 3,
            status: ComputeStatus::Idle,
        };
        let computing = Phase {
            status: ComputeStatus::Computing,
            ..idle
        };
        let computed = Phase {
            status: ComputeStatus::Computed,
            ..idle
        };

        assert_eq!(computing.invalidated(true), None);
        assert_eq!(computed.invalidated(false), Some(idle));
        assert_eq!(
            computed.invalidated(true),
            Some(Phase {
                generation: 4,
                status: ComputeStatus::Computing
            })
        );
        assert_eq!(idle.invalidated(false).map(|p| p.status), Some(ComputeStatus::Computing));
    }

    #[test]
    fn first_observer_triggers_compute() {
        let (value, counters) = counting();
        assert_eq!(counters.computes(), 0);
        assert!(!value.is_running_or_has_computed());

        let seen = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&seen);
        value.observe(move |v| sink.store(*v, Ordering::SeqCst));

        assert!(wait_until(|| value.has_computed()));
        assert_eq!(counters.computes(), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(value.value(), Some(1));
        assert!(!value.is_running());
        assert_eq!(counters.aborts(), 0);
    }

    #[test]
    fn invalidate_with_observers_computes_again() {
        let (value, counters) = counting();
        value.observe(|_| {});
        assert!(wait_until(|| value.has_computed()));

        value.invalidate();

        assert!(wait_until(|| counters.computes() == 2 && value.has_computed()));
        assert_eq!(value.value(), Some(2));
        assert_eq!(counters.aborts(), 0);
    }

    #[test]
    fn invalidate_without_observers_defers_until_next_observer() {
        let (value, counters) = counting();
        let id = value.observe(|_| {});
        assert!(wait_until(|| value.has_computed()));

        assert!(value.remove_observer(id));
        assert!(value.has_computed());

        value.invalidate();
        assert!(!value.has_computed());
        assert!(!value.is_running());
        thread::sleep(Duration::from_millis(20));
        assert_eq!(counters.computes(), 1);

        value.observe(|_| {});
        assert!(wait_until(|| value.has_computed()));
        assert_eq!(counters.computes(), 2);
        assert_eq!(counters.aborts(), 0);
    }

    #[test]
    fn invalidate_while_running_does_nothing() {
        let (value, counters, release, started) = gated();
        assert!(!value.is_running_or_has_computed());

        value.observe(|_| {});
        started.recv_timeout(Duration::from_secs(5)).unwrap();

        value.invalidate();
        assert!(value.is_running());
        assert!(value.is_running_or_has_computed());

        release.send(()).unwrap();
        assert!(wait_until(|| value.has_computed()));
        thread::sleep(Duration::from_millis(20));
        assert_eq!(counters.computes(), 1);
        assert_eq!(counters.aborts(), 0);
    }

    #[test]
    fn failed_compute_leaves_value_uncomputed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let value = ComputableValue::<u8>::from_fn(
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ComputeError::failed("backend unavailable"))
            },
            || {},
        );

        value.observe(|_| {});

        assert!(wait_until(|| value.last_error().is_some()));
        assert!(!value.is_running());
        assert!(!value.has_computed());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            value.last_error(),
            Some(ComputeError::Failed("backend unavailable".to_string()))
        );
    }

    #[test]
    fn panicking_compute_is_reported() {
        let value = ComputableValue::<u8>::from_fn(|_| panic!("boom"), || {});

        value.invalidate();

        assert!(wait_until(|| value.last_error().is_some()));
        assert_eq!(value.status(), ComputeStatus::Idle);
        assert_eq!(value.last_error(), Some(ComputeError::Panicked("boom".to_string())));
    }

    #[test]
    fn success_clears_previous_error() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let value = ComputableValue::from_fn(
            move |scope| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    return Err(ComputeError::failed("first try"));
                }
                scope.post_value(7u8);
                Ok(())
            },
            || {},
        );
        value.observe(|_| {});
        assert!(wait_until(|| value.last_error().is_some()));

        value.invalidate();

        assert!(wait_until(|| value.has_computed()));
        assert_eq!(value.last_error(), None);
        assert_eq!(value.value(), Some(7));
    }

    #[test]
    fn becoming_active_after_compute_does_not_recompute() {
        let (value, counters) = counting();
        let id = value.observe(|_| {});
        assert!(wait_until(|| value.has_computed()));
        value.remove_observer(id);

        let seen = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&seen);
        value.observe(move |v| sink.store(*v, Ordering::SeqCst));
        thread::sleep(Duration::from_millis(20));

        assert_eq!(counters.computes(), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(counters.aborts(), 0);
    }

    #[test]
    fn interrupt_without_compute_calls_abort() {
        let (value, counters) = counting();

        value.interrupt();

        assert_eq!(counters.aborts(), 1);
        assert!(!value.is_running());
        assert!(!value.has_computed());
        assert_eq!(counters.computes(), 0);
    }

    #[test]
    fn interrupt_after_compute_resets() {
        let (value, counters) = counting();
        value.observe(|_| {});
        assert!(wait_until(|| value.has_computed()));

        value.interrupt();

        assert_eq!(counters.aborts(), 1);
        assert!(!value.is_running_or_has_computed());
        assert_eq!(counters.computes(), 1);
    }

    #[test]
    fn interrupt_mid_compute_stops_worker() {
        let (value, counters, _release, started) = gated();
        let posted = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&posted);
        value.observe(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        started.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(value.is_running());

        value.interrupt();

        assert!(!value.is_running());
        assert!(!value.has_computed());
        assert_eq!(counters.aborts(), 1);

        thread::sleep(Duration::from_millis(30));
        assert!(!value.is_running_or_has_computed());
        assert_eq!(posted.load(Ordering::SeqCst), 0);
        assert_eq!(value.last_error(), None);
        assert_eq!(counters.aborts(), 1);
    }

    #[test]
    fn invalidate_after_interrupt_runs_fresh_compute() {
        let (value, counters, release, started) = gated();
        value.observe(|_| {});
        started.recv_timeout(Duration::from_secs(5)).unwrap();
        value.interrupt();

        value.invalidate();
        started.recv_timeout(Duration::from_secs(5)).unwrap();
        release.send(()).unwrap();

        assert!(wait_until(|| value.has_computed()));
        assert_eq!(counters.computes(), 2);
        assert_eq!(value.value(), Some(1));
    }

    #[test]
    fn unbounded_sleep_waits_until_interrupted() {
        let (started_tx, started_rx) = mpsc::channel();
        let started_tx = Mutex::new(started_tx);
        let value = ComputableValue::<usize>::from_fn(
            move |scope| {
                let _ = started_tx.lock().send(());
                scope.sleep(Duration::MAX)?;
                scope.post_value(1);
                Ok(())
            },
            || {},
        );
        value.observe(|_| {});
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        thread::sleep(Duration::from_millis(20));
        assert!(value.is_running());
        assert_eq!(value.last_error(), None);

        value.interrupt();

        assert!(!value.is_running_or_has_computed());
        assert_eq!(value.value(), None);
    }

    #[test]
    fn sleep_returns_after_short_duration() {
        let value = ComputableValue::<usize>::from_fn(
            |scope| {
                scope.sleep(Duration::from_millis(5))?;
                scope.post_value(7);
                Ok(())
            },
            || {},
        );
        value.observe(|_| {});

        assert!(wait_until(|| value.has_computed()));
        assert_eq!(value.value(), Some(7));
        assert_eq!(value.last_error(), None);
    }

    #[test]
    fn clones_share_state() {
        let (value, counters) = counting();
        let other = value.clone();

        other.observe(|_| {});

        assert!(wait_until(|| value.has_computed()));
        assert!(value.has_observers());
        assert_eq!(counters.computes(), 1);
    }
}
