//! UI Components
//!
//! Leptos components rendering the `ListView` and wiring gestures to the
//! controller.

mod new_todo_form;
mod todo_item;
mod todo_list;
mod filter_bar;
mod footer;
mod toast_stack;

pub use new_todo_form::NewTodoForm;
pub use todo_item::{PendingItem, TodoItem};
pub use todo_list::TodoList;
pub use filter_bar::FilterBar;
pub use footer::Footer;
pub use toast_stack::ToastStack;
