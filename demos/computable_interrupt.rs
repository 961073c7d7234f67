//! Computable Value with Interrupt
//!
//! This example shows a value that is computed on a worker thread only while
//! somebody observes it, reports progress as it goes, and can be interrupted
//! and started again.
//!
//! Key concepts:
//! - Lazy start: nothing runs until the first observer arrives
//! - Progress published through `ComputeScope::post_value`
//! - Cooperative interruption with `ComputeScope::sleep`
//! - Recomputing with `invalidate`
//!
//! Run with: cargo run --example computable_interrupt

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use viewstate::computable::{ComputableValue, ComputeError};

const STEPS: u32 = 5;

fn wait_for(value: &ComputableValue<u32>, timeout: Duration) -> bool {
    let step = Duration::from_millis(10);
    let mut waited = Duration::ZERO;
    while waited < timeout {
        if value.has_computed() {
            return true;
        }
        thread::sleep(step);
        waited += step;
    }
    value.has_computed()
}

fn main() {
    println!("=== Computable Value Example ===\n");

    let aborts = Arc::new(AtomicUsize::new(0));
    let abort_counter = Arc::clone(&aborts);

    // Percentage of a slow download, one step every 50ms
    let progress = ComputableValue::<u32>::from_fn(
        |scope| {
            for step in 1..=STEPS {
                scope.sleep(Duration::from_millis(50))?;
                if !scope.post_value(step * 100 / STEPS) {
                    return Err(ComputeError::Interrupted);
                }
            }
            Ok(())
        },
        move || {
            abort_counter.fetch_add(1, Ordering::SeqCst);
            println!("  [abort] cancelling download");
        },
    );

    println!("Before observing: running = {}", progress.is_running());

    progress.observe(|percent| println!("  progress {}%", percent));
    println!("Observer attached: running = {}", progress.is_running());

    thread::sleep(Duration::from_millis(120));
    println!("\nInterrupting...");
    progress.interrupt();
    println!(
        "  running = {}, computed = {}, aborts = {}",
        progress.is_running(),
        progress.has_computed(),
        aborts.load(Ordering::SeqCst)
    );

    println!("\nInvalidating to start over:");
    progress.invalidate();
    if wait_for(&progress, Duration::from_secs(5)) {
        println!("  finished at {:?}%", progress.value());
    } else {
        println!("  still running, last error: {:?}", progress.last_error());
    }

    progress.remove_observers();
    println!(
        "\nObservers removed: computed = {}, has observers = {}",
        progress.has_computed(),
        progress.has_observers()
    );

    println!("\n=== Example Complete ===");
}
