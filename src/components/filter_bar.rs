//! Filter Bar Component
//!
//! All / Active / Completed switch.

use leptos::prelude::*;
use todo_state::{Filter, ListView};

use crate::context::use_app_context;

#[component]
pub fn FilterBar(list: Memo<ListView>) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="filters">
            {Filter::ALL.iter().map(|&filter| {
                let is_active = move || list.with(|l| l.filter == filter);
                view! {
                    <button
                        class=move || if is_active() { "filter-btn active" } else { "filter-btn" }
                        data-filter=filter.as_str()
                        on:click=move |_| ctx.controller().set_filter(filter)
                    >
                        {filter.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
