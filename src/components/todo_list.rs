//! Todo List Component
//!
//! Renders the projected rows of a `ListView`, then in-flight creations.

use leptos::prelude::*;
use todo_state::{Filter, ListView};

use crate::components::{PendingItem, TodoItem};

/// The visible todo list
#[component]
pub fn TodoList(list: Memo<ListView>) -> impl IntoView {
    let list_class = move || {
        if list.with(|l| l.loading) { "todo-list loading" } else { "todo-list" }
    };

    view! {
        <div id="todo-list" class=list_class>
            <For
                each=move || list.with(|l| l.rows.clone())
                // whole row as key: any change rebuilds that row
                key=|row| row.clone()
                children=move |row| view! { <TodoItem row=row /> }
            />
            <For
                each=move || list.with(|l| l.pending.clone())
                key=|row| row.key
                children=move |row| view! { <PendingItem row=row /> }
            />
            <Show when=move || list.with(|l| l.is_empty() && !l.loading)>
                <p class="empty-state">{move || empty_message(list.with(|l| l.filter))}</p>
            </Show>
        </div>
    }
}

fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "Nothing to do yet",
        Filter::Active => "No active todos",
        Filter::Completed => "No completed todos",
    }
}
