//! Reactive State Store
//!
//! The todo state lives in one `RwSignal`; this adapter lets the controller
//! read and mutate it without knowing about Leptos.

use leptos::prelude::*;
use todo_state::{StateCell, TodoState};

/// Signal-backed `StateCell`
#[derive(Clone, Copy)]
pub struct SignalState(pub RwSignal<TodoState>);

impl SignalState {
    pub fn new() -> Self {
        Self(RwSignal::new(TodoState::new()))
    }

    pub fn signal(&self) -> RwSignal<TodoState> {
        self.0
    }
}

impl Default for SignalState {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCell for SignalState {
    fn read<R>(&self, f: impl FnOnce(&TodoState) -> R) -> R {
        // controller reads must not subscribe whatever effect happens to run
        self.0.with_untracked(f)
    }

    fn update<R>(&self, f: impl FnOnce(&mut TodoState) -> R) -> R {
        // guard notifies subscribers when dropped
        let mut guard = self.0.write();
        f(&mut *guard)
    }
}
