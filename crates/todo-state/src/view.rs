//! View Projection
//!
//! Pure functions from `TodoState` to what the list shows. The Leptos
//! components only turn a `ListView` into DOM.

use crate::filter::Filter;
use crate::model::{Todo, TodoId};
use crate::state::{PendingKey, TodoState};

/// Visible todos under the active filter, in collection order
pub fn project(state: &TodoState) -> Vec<Todo> {
    let filter = state.filter();
    state
        .todos()
        .iter()
        .filter(|todo| filter.matches(todo))
        .cloned()
        .collect()
}

/// One rendered todo row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodoRow {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    /// Label is replaced by an edit input
    pub editing: bool,
}

/// One rendered in-flight creation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PendingRow {
    pub key: PendingKey,
    pub title: String,
}

pub fn render_rows(projected: &[Todo], editing_id: Option<TodoId>) -> Vec<TodoRow> {
    projected
        .iter()
        .map(|todo| TodoRow {
            id: todo.id,
            title: todo.title.clone(),
            completed: todo.completed,
            editing: editing_id == Some(todo.id),
        })
        .collect()
}

/// Everything the list and footer render
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListView {
    pub rows: Vec<TodoRow>,
    pub pending: Vec<PendingRow>,
    pub active_count: usize,
    pub filter: Filter,
    pub has_completed: bool,
    pub loading: bool,
}

impl ListView {
    pub fn from_state(state: &TodoState) -> Self {
        let filter = state.filter();
        // in-flight creations are never completed
        let pending = if filter == Filter::Completed {
            Vec::new()
        } else {
            state
                .pending()
                .iter()
                .filter(|p| !p.delete_requested)
                .map(|p| PendingRow {
                    key: p.key,
                    title: p.title.clone(),
                })
                .collect()
        };

        Self {
            rows: render_rows(&project(state), state.editing_id()),
            pending,
            active_count: state.active_count(),
            filter,
            has_completed: state.has_completed(),
            loading: state.is_loading(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.pending.is_empty()
    }

    /// Footer text, e.g. "1 item left" / "3 items left"
    pub fn items_left_label(&self) -> String {
        match self.active_count {
            1 => "1 item left".to_string(),
            n => format!("{} items left", n),
        }
    }
}
