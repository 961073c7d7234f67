//! Screen States
//!
//! This example drives a small screen through loading, content and error
//! states with a view state machine, then saves the current state and
//! restores it into a freshly built screen.
//!
//! Key concepts:
//! - Typed state keys with `state_keys!`
//! - Declaring visibility and enablement per state
//! - Saving and restoring the current state key
//!
//! Run with: cargo run --example screen_states

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use viewstate::checkpoint::InstanceState;
use viewstate::effects::{View, ViewStateMachine, Visibility};
use viewstate::state_keys;

state_keys! {
    enum Screen {
        Loading = 0,
        Content = 1,
        Error = 2,
    }
}

// A stand-in for a toolkit widget that just remembers its flags
struct Widget {
    name: &'static str,
    shown: AtomicBool,
    enabled: AtomicBool,
}

impl Widget {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            shown: AtomicBool::new(false),
            enabled: AtomicBool::new(true),
        })
    }

    fn describe(&self) -> String {
        format!(
            "{}: {}{}",
            self.name,
            if self.shown.load(Ordering::SeqCst) { "shown" } else { "hidden" },
            if self.enabled.load(Ordering::SeqCst) { "" } else { ", disabled" }
        )
    }
}

impl View for Widget {
    fn set_visibility(&self, visibility: Visibility) {
        self.shown.store(visibility == Visibility::Visible, Ordering::SeqCst);
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

struct ScreenWidgets {
    spinner: Arc<Widget>,
    list: Arc<Widget>,
    message: Arc<Widget>,
    retry: Arc<Widget>,
}

impl ScreenWidgets {
    fn new() -> Self {
        Self {
            spinner: Widget::new("spinner"),
            list: Widget::new("list"),
            message: Widget::new("message"),
            retry: Widget::new("retry"),
        }
    }

    fn print(&self) {
        for widget in [&self.spinner, &self.list, &self.message, &self.retry] {
            println!("    {}", widget.describe());
        }
    }
}

fn build_machine(w: &ScreenWidgets) -> Result<ViewStateMachine, viewstate::MachineError> {
    let mut machine = ViewStateMachine::default();
    machine
        .state(Screen::Loading, |s| {
            s.visibles([&w.spinner])
                .gones([&w.list, &w.message])
                .disables([&w.retry])
        })?
        .state(Screen::Content, |s| {
            s.visibles([&w.list])
                .gones([&w.spinner, &w.message, &w.retry])
        })?
        .state(Screen::Error, |s| {
            s.visibles([&w.message, &w.retry])
                .gones([&w.spinner, &w.list])
                .enables([&w.retry])
        })?;
    machine.config_mut().set_initial_state(Screen::Loading)?;
    machine
        .config_mut()
        .set_on_change_state(|key| match Screen::from_key(key) {
            Some(screen) => println!("  -> {}", screen.name()),
            None => println!("  -> unknown state {}", key),
        });
    Ok(machine)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Screen States Example ===\n");

    let names: Vec<_> = Screen::ALL.iter().map(|screen| screen.name()).collect();
    println!("States: {}\n", names.join(", "));

    let widgets = ScreenWidgets::new();
    let mut machine = build_machine(&widgets)?;

    println!("Starting:");
    machine.start()?;
    widgets.print();

    println!("\nLoad failed:");
    machine.change_state(Screen::Error)?;
    widgets.print();

    println!("\nRetry succeeded:");
    machine.change_state(Screen::Loading)?;
    machine.change_state(Screen::Content)?;
    widgets.print();

    println!("\nSaving instance state...");
    let json = machine.save_instance_state().to_json()?;
    println!("  {}", json);
    machine.shutdown();

    println!("\nRebuilding the screen and restoring:");
    let restored_widgets = ScreenWidgets::new();
    let mut restored = build_machine(&restored_widgets)?;
    let saved = InstanceState::from_json(&json)?;
    restored.restore_instance_state(Some(&saved))?;
    restored.start()?;
    restored_widgets.print();

    let current = restored.current_state_key().and_then(Screen::from_key);
    println!("\nResumed on {:?}", current);

    println!("\n=== Example Complete ===");
    Ok(())
}
