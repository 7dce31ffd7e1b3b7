//! Toast Notifications
//!
//! Controller notices become toasts that remove themselves after the
//! configured duration.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use todo_state::{Notice, Notifier};

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// `Notifier` that feeds the toast stack
#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
    duration_ms: u32,
}

impl Toaster {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
            duration_ms,
        }
    }

    /// Currently visible toasts, oldest first
    pub fn toasts(&self) -> RwSignal<Vec<Toast>> {
        self.toasts
    }

    pub fn dismiss(&self, id: u64) {
        let _ = self.toasts.try_update(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl Notifier for Toaster {
    fn notify(&self, notice: Notice) {
        let id = self.next_id.get_untracked() + 1;
        self.next_id.set(id);
        self.toasts.update(|toasts| toasts.push(Toast { id, notice }));

        let toaster = *self;
        Timeout::new(self.duration_ms, move || toaster.dismiss(id)).forget();
    }
}
