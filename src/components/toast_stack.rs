//! Toast Stack Component
//!
//! Success/error messages above the list; each removes itself on a timer.

use leptos::prelude::*;
use todo_state::NoticeKind;

use crate::context::use_app_context;

fn toast_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "success-message",
        NoticeKind::Error => "error-message",
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toasts">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = toast_class(toast.notice.kind);
                    view! { <div class=class role="status">{toast.notice.message}</div> }
                }
            />
        </div>
    }
}
