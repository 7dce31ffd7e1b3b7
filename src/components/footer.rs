//! Footer Component
//!
//! Items-left counter, filters and "clear completed".

use leptos::prelude::*;
use todo_state::ListView;

use crate::components::FilterBar;
use crate::context::use_app_context;

#[component]
pub fn Footer(list: Memo<ListView>) -> impl IntoView {
    let ctx = use_app_context();

    let on_clear = move |_| {
        ctx.spawn(|ctl| async move {
            let report = ctl.clear_completed().await;
            log::debug!("Clear completed: removed {:?}, failed {:?}", report.removed, report.failed);
        });
    };

    view! {
        <footer class="todo-footer">
            // counts the whole collection, not the filtered view
            <span id="items-left" class="items-left">{move || list.with(|l| l.items_left_label())}</span>
            <FilterBar list=list />
            <button
                id="clear-completed"
                class="clear-completed"
                disabled=move || !list.with(|l| l.has_completed)
                on:click=on_clear
            >
                "Clear completed"
            </button>
        </footer>
    }
}
