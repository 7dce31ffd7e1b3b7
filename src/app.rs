//! Todo Frontend App
//!
//! Owns the state signal and wires the components around one `ListView`.

use leptos::prelude::*;
use todo_state::ListView;

use crate::components::{Footer, NewTodoForm, TodoList, ToastStack};
use crate::config::Config;
use crate::context::AppContext;

#[component]
pub fn App() -> impl IntoView {
    let config = Config::load();
    let ctx = AppContext::new(&config);

    // Provide context to all children
    provide_context(ctx);

    // Every render is a projection of the current state
    let list = Memo::new(move |_| ctx.state.with(ListView::from_state));

    // Initial fetch
    Effect::new(move |_| {
        ctx.spawn(|ctl| async move {
            ctl.load().await;
        });
    });

    view! {
        <main class="container">
            <h1>"Todos"</h1>
            <NewTodoForm />
            <ToastStack />
            <TodoList list=list />
            <Footer list=list />
        </main>
    }
}
