//! Todo Item Component
//!
//! One row of the list: checkbox, label (edit input while editing), delete.

use leptos::prelude::*;
use todo_state::{PendingRow, TodoId, TodoRow};

use crate::context::use_app_context;

/// A single todo row
#[component]
pub fn TodoItem(row: TodoRow) -> impl IntoView {
    let ctx = use_app_context();

    let id = row.id;
    let completed = row.completed;

    let on_toggle = move |ev: web_sys::Event| {
        // the box only flips once the server confirms and the row re-renders
        event_target::<web_sys::HtmlInputElement>(&ev).set_checked(completed);
        ctx.spawn(move |ctl| async move {
            ctl.toggle(id).await;
        });
    };

    let on_delete = move |_| {
        ctx.spawn(move |ctl| async move {
            ctl.delete(id).await;
        });
    };

    let label = if row.editing {
        view! { <EditInput todo_id=id title=row.title.clone() /> }.into_any()
    } else {
        view! {
            <span
                class="todo-text"
                title="Double-click to edit"
                on:dblclick=move |_| {
                    ctx.controller().begin_edit(id);
                }
            >
                {row.title.clone()}
            </span>
        }
        .into_any()
    };

    view! {
        <div class=if completed { "todo-item completed" } else { "todo-item" } data-id=id.to_string()>
            <input
                type="checkbox"
                class="todo-checkbox"
                prop:checked=completed
                on:change=on_toggle
            />
            {label}
            <button class="delete-btn" on:click=on_delete>"×"</button>
        </div>
    }
}

/// Edit input shown in place of the label; focused on mount.
/// Enter or blur commits, Escape cancels.
#[component]
fn EditInput(todo_id: TodoId, title: String) -> impl IntoView {
    let ctx = use_app_context();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
            input.select();
        }
    });

    let commit = move |text: String| {
        ctx.spawn(move |ctl| async move {
            ctl.commit_edit(todo_id, &text).await;
        });
    };

    view! {
        <input
            type="text"
            class="todo-text editing"
            node_ref=input_ref
            value=title
            on:blur=move |ev| commit(event_target_value(&ev))
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                match ev.key().as_str() {
                    "Enter" => {
                        ev.prevent_default();
                        commit(event_target_value(&ev));
                    }
                    "Escape" => {
                        ev.prevent_default();
                        ctx.controller().cancel_edit();
                    }
                    _ => {}
                }
            }
        />
    }
}

/// Row for a todo whose create request is still in flight
#[component]
pub fn PendingItem(row: PendingRow) -> impl IntoView {
    let ctx = use_app_context();
    let key = row.key;

    view! {
        <div class="todo-item pending">
            <input type="checkbox" class="todo-checkbox" disabled=true />
            <span class="todo-text">{row.title}</span>
            <button
                class="delete-btn"
                on:click=move |_| {
                    ctx.controller().delete_pending(key);
                }
            >
                "×"
            </button>
        </div>
    }
}
