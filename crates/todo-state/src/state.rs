//! Local State
//!
//! Ordered todo collection plus UI flags. All mutation goes through the
//! `apply_*` / `set_*` methods so ids stay unique and the editing id never
//! outlives its record.

use std::cell::RefCell;
use std::rc::Rc;

use crate::filter::Filter;
use crate::model::{Todo, TodoId};

/// Client-local handle for a create request that has not returned yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PendingKey(pub u64);

/// A todo whose create request is still in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTodo {
    pub key: PendingKey,
    pub title: String,
    /// User deleted the row before the server assigned an id
    pub delete_requested: bool,
}

/// Confirmed mutation seen while the full fetch is in flight
#[derive(Debug, Clone, PartialEq)]
enum Replay {
    Created(Todo),
    Updated(Todo),
    Deleted(TodoId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoState {
    todos: Vec<Todo>,
    filter: Filter,
    editing: Option<TodoId>,
    /// Edit whose title update is in flight
    committing: Option<TodoId>,
    pending: Vec<PendingTodo>,
    next_pending: u64,
    loading: bool,
    replay: Vec<Replay>,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with an already-fetched collection
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let mut state = Self::new();
        state.apply_loaded(todos);
        state
    }

    // ========================
    // Queries
    // ========================

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Editing id, ignoring one whose record is gone
    pub fn editing_id(&self) -> Option<TodoId> {
        self.editing.filter(|id| self.contains(*id))
    }

    pub fn is_committing(&self, id: TodoId) -> bool {
        self.committing == Some(id) && self.editing_id() == Some(id)
    }

    pub fn pending(&self) -> &[PendingTodo] {
        &self.pending
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Incomplete todos across the whole collection, independent of the filter
    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    pub fn completed_ids(&self) -> Vec<TodoId> {
        self.todos
            .iter()
            .filter(|todo| todo.completed)
            .map(|todo| todo.id)
            .collect()
    }

    pub fn has_completed(&self) -> bool {
        self.todos.iter().any(|todo| todo.completed)
    }

    // ========================
    // Server-confirmed mutations
    // ========================

    /// Replace the collection with a full fetch. Later duplicates are dropped.
    /// Mutations confirmed while the fetch was in flight are replayed on top,
    /// since the fetched list may predate them.
    pub fn apply_loaded(&mut self, todos: Vec<Todo>) {
        self.todos.clear();
        for todo in todos {
            if !self.contains(todo.id) {
                self.todos.push(todo);
            }
        }
        for change in std::mem::take(&mut self.replay) {
            match change {
                Replay::Created(todo) => self.upsert(todo),
                Replay::Updated(todo) => {
                    self.replace(todo);
                }
                Replay::Deleted(id) => {
                    self.remove(id);
                }
            }
        }
        self.clear_stale_editing();
    }

    /// Append a created record. A known id is replaced in place instead.
    pub fn apply_created(&mut self, todo: Todo) {
        if self.loading {
            self.replay.push(Replay::Created(todo.clone()));
        }
        self.upsert(todo);
    }

    /// Replace the record with the same id, keeping its position.
    /// Returns false (and changes nothing) when the id is absent.
    pub fn apply_updated(&mut self, todo: Todo) -> bool {
        if self.loading {
            self.replay.push(Replay::Updated(todo.clone()));
        }
        self.replace(todo)
    }

    /// Remove a record. Returns false when the id is absent.
    pub fn apply_deleted(&mut self, id: TodoId) -> bool {
        if self.loading {
            self.replay.push(Replay::Deleted(id));
        }
        self.remove(id)
    }

    fn upsert(&mut self, todo: Todo) {
        match self.todos.iter_mut().find(|t| t.id == todo.id) {
            Some(existing) => *existing = todo,
            None => self.todos.push(todo),
        }
    }

    fn replace(&mut self, todo: Todo) -> bool {
        match self.todos.iter_mut().find(|t| t.id == todo.id) {
            Some(existing) => {
                *existing = todo;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: TodoId) -> bool {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        if self.editing == Some(id) {
            self.editing = None;
            self.committing = None;
        }
        self.todos.len() != before
    }

    // ========================
    // UI state
    // ========================

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Enter or leave edit mode. An unknown id leaves editing cleared.
    pub fn set_editing(&mut self, id: Option<TodoId>) -> bool {
        self.committing = None;
        match id {
            Some(id) if self.contains(id) => {
                self.editing = Some(id);
                true
            }
            Some(_) => {
                self.editing = None;
                false
            }
            None => {
                self.editing = None;
                true
            }
        }
    }

    /// Start or end the full fetch. Either way the replay log starts empty.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.replay.clear();
    }

    /// Mark the edited todo's title update as sent. Returns false when the
    /// todo is not being edited or its update is already in flight.
    pub fn begin_commit(&mut self, id: TodoId) -> bool {
        if self.editing_id() != Some(id) || self.committing == Some(id) {
            return false;
        }
        self.committing = Some(id);
        true
    }

    /// Leave edit mode once the title update has finished, unless the user
    /// has moved on to another edit meanwhile.
    pub fn finish_commit(&mut self, id: TodoId) {
        if self.committing == Some(id) {
            self.committing = None;
            if self.editing == Some(id) {
                self.editing = None;
            }
        }
    }

    fn clear_stale_editing(&mut self) {
        if self.editing_id().is_none() {
            self.editing = None;
            self.committing = None;
        }
    }

    // ========================
    // Pending creations
    // ========================

    /// Track a create request that was just issued
    pub fn begin_create(&mut self, title: String) -> PendingKey {
        self.next_pending += 1;
        let key = PendingKey(self.next_pending);
        self.pending.push(PendingTodo {
            key,
            title,
            delete_requested: false,
        });
        key
    }

    /// Mark a pending creation for deletion once its id is known
    pub fn request_pending_delete(&mut self, key: PendingKey) -> bool {
        match self.pending.iter_mut().find(|p| p.key == key) {
            Some(pending) => {
                pending.delete_requested = true;
                true
            }
            None => false,
        }
    }

    /// Stop tracking a create request whose response arrived
    pub fn finish_create(&mut self, key: PendingKey) -> Option<PendingTodo> {
        let index = self.pending.iter().position(|p| p.key == key)?;
        Some(self.pending.remove(index))
    }
}

/// Shared access to a `TodoState`.
///
/// Closures run synchronously; implementations must not let a borrow escape
/// them, so no borrow is ever held across an `.await`.
pub trait StateCell {
    fn read<R>(&self, f: impl FnOnce(&TodoState) -> R) -> R;
    fn update<R>(&self, f: impl FnOnce(&mut TodoState) -> R) -> R;
}

impl StateCell for RefCell<TodoState> {
    fn read<R>(&self, f: impl FnOnce(&TodoState) -> R) -> R {
        f(&self.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut TodoState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

impl<S: StateCell + ?Sized> StateCell for Rc<S> {
    fn read<R>(&self, f: impl FnOnce(&TodoState) -> R) -> R {
        (**self).read(f)
    }

    fn update<R>(&self, f: impl FnOnce(&mut TodoState) -> R) -> R {
        (**self).update(f)
    }
}
