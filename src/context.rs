//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_state::{Controller, TodoState};

use crate::api::HttpTodoStore;
use crate::config::Config;
use crate::store::SignalState;
use crate::toast::{Toast, Toaster};

pub type AppController = Controller<HttpTodoStore, SignalState, Toaster>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Local todo state (source of every render)
    pub state: RwSignal<TodoState>,
    /// Toasts on screen
    pub toasts: RwSignal<Vec<Toast>>,
    /// Controller is `!Send` (it owns browser fetch futures), so it lives in
    /// local storage and is handed out as `Rc`
    controller: StoredValue<Rc<AppController>, LocalStorage>,
}

impl AppContext {
    pub fn new(config: &Config) -> Self {
        let state = SignalState::new();
        let toaster = Toaster::new(config.toast_duration_ms);
        let api = HttpTodoStore::new(config.api_base_url.clone());
        log::info!("Using todo API at {}", api.base_url());

        Self {
            state: state.signal(),
            toasts: toaster.toasts(),
            controller: StoredValue::new_local(Rc::new(Controller::new(api, state, toaster))),
        }
    }

    pub fn controller(&self) -> Rc<AppController> {
        self.controller.get_value()
    }

    /// Run an async controller action on the event loop
    pub fn spawn<F, Fut>(&self, action: F)
    where
        F: FnOnce(Rc<AppController>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(action(self.controller()));
    }
}

/// Get the app context provided by `App`
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
