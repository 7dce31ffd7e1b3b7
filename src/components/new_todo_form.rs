//! New Todo Form Component
//!
//! Text input + submit. Blank input is ignored without a request.

use leptos::prelude::*;
use todo_state::normalize_title;

use crate::context::use_app_context;

/// Form for creating new todos
#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_app_context();
    let (new_title, set_new_title) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get_untracked();
        if normalize_title(&title).is_none() {
            return;
        }
        // pending row takes over showing the title
        set_new_title.set(String::new());
        ctx.spawn(move |ctl| async move {
            ctl.submit(&title).await;
        });
    };

    view! {
        <form id="todo-form" class="todo-form" on:submit=on_submit>
            <input
                id="todo-input"
                type="text"
                placeholder="What needs to be done?"
                autocomplete="off"
                prop:value=move || new_title.get()
                on:input=move |ev| set_new_title.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
        </form>
    }
}
