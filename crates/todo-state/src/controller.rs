//! Interaction Controller
//!
//! Turns user gestures into remote calls and replays each confirmed result
//! onto the local state. Every remote failure ends here: it is logged, shown
//! as an error notice, and leaves the state untouched.

use std::cell::RefCell;

use crate::filter::Filter;
use crate::model::{normalize_title, Todo, TodoId, TodoPatch};
use crate::notice::{Notice, Notifier};
use crate::remote::TodoApi;
use crate::sequence::RequestLedger;
use crate::state::{PendingKey, StateCell};

/// Result of submitting the new-todo form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input, nothing sent
    Ignored,
    Created(Todo),
    /// Row was deleted while the create was in flight; the new id was removed
    Discarded(TodoId),
    Failed,
}

/// Result of an update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied(Todo),
    /// A newer response for the same record was already applied
    Superseded,
    Failed,
}

/// Result of ending an edit with a commit gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The todo was not being edited (e.g. blur after Enter)
    NotEditing,
    /// Blank title, handled as cancel
    Cancelled,
    Saved(UpdateOutcome),
}

/// Per-id result of "clear completed"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub removed: Vec<TodoId>,
    pub failed: Vec<TodoId>,
}

pub struct Controller<A, S, N> {
    api: A,
    state: S,
    notifier: N,
    ledger: RefCell<RequestLedger>,
}

impl<A, S, N> Controller<A, S, N>
where
    A: TodoApi,
    S: StateCell,
    N: Notifier,
{
    pub fn new(api: A, state: S, notifier: N) -> Self {
        Self {
            api,
            state,
            notifier,
            ledger: RefCell::new(RequestLedger::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Initial full fetch. Gestures stay enabled meanwhile; whatever they
    /// confirm before the list arrives is replayed on top of it.
    pub async fn load(&self) -> bool {
        self.state.update(|s| s.set_loading(true));

        match self.api.list_todos().await {
            Ok(todos) => {
                log::info!("Loaded {} todos", todos.len());
                self.state.update(|s| {
                    s.apply_loaded(todos);
                    s.set_loading(false);
                });
                true
            }
            Err(e) => {
                log::error!("{}", e);
                self.state.update(|s| s.set_loading(false));
                self.notifier.notify(Notice::error("Failed to load todos"));
                false
            }
        }
    }

    pub async fn submit(&self, raw: &str) -> Submission {
        let Some(title) = normalize_title(raw) else {
            return Submission::Ignored;
        };

        let key = self.state.update(|s| s.begin_create(title.clone()));
        let result = self.api.create_todo(&title).await;
        let delete_requested = self
            .state
            .update(|s| s.finish_create(key))
            .is_some_and(|p| p.delete_requested);

        let todo = match result {
            Ok(todo) => todo,
            Err(e) => {
                log::error!("{}", e);
                self.notifier.notify(Notice::error("Failed to create todo"));
                return Submission::Failed;
            }
        };

        if !delete_requested {
            log::debug!("Created todo {}", todo.id);
            self.state.update(|s| s.apply_created(todo.clone()));
            self.notifier.notify(Notice::success("Todo created successfully"));
            return Submission::Created(todo);
        }

        // deleted while in flight: the id is known now, remove it server-side
        match self.api.delete_todo(todo.id).await {
            Ok(()) => {
                log::debug!("Discarded todo {} deleted before creation finished", todo.id);
                self.notifier.notify(Notice::success("Todo deleted successfully"));
                Submission::Discarded(todo.id)
            }
            Err(e) => {
                log::error!("{}", e);
                self.state.update(|s| s.apply_created(todo.clone()));
                self.notifier.notify(Notice::error("Failed to delete todo"));
                Submission::Created(todo)
            }
        }
    }

    /// Delete a row whose create request has not returned yet
    pub fn delete_pending(&self, key: PendingKey) -> bool {
        self.state.update(|s| s.request_pending_delete(key))
    }

    pub async fn toggle(&self, id: TodoId) -> UpdateOutcome {
        let Some(completed) = self.state.read(|s| s.get(id).map(|t| t.completed)) else {
            log::warn!("Toggle for unknown todo {}", id);
            return UpdateOutcome::Failed;
        };
        self.send_update(id, TodoPatch::completed(!completed)).await
    }

    pub fn begin_edit(&self, id: TodoId) -> bool {
        self.state.update(|s| s.set_editing(Some(id)))
    }

    pub fn cancel_edit(&self) {
        self.state.update(|s| s.set_editing(None));
    }

    /// Confirm or blur. The todo stays in edit mode until the update has
    /// been applied or has failed; a commit while one is in flight (the blur
    /// that follows Enter) is ignored.
    pub async fn commit_edit(&self, id: TodoId, text: &str) -> EditOutcome {
        let (editing, committing) = self.state.read(|s| (s.editing_id(), s.is_committing(id)));
        if editing != Some(id) || committing {
            return EditOutcome::NotEditing;
        }

        let Some(title) = normalize_title(text) else {
            self.cancel_edit();
            return EditOutcome::Cancelled;
        };

        self.state.update(|s| s.begin_commit(id));
        let outcome = self.send_update(id, TodoPatch::title(title)).await;
        self.state.update(|s| s.finish_commit(id));
        EditOutcome::Saved(outcome)
    }

    pub async fn delete(&self, id: TodoId) -> bool {
        match self.api.delete_todo(id).await {
            Ok(()) => {
                self.state.update(|s| s.apply_deleted(id));
                self.ledger.borrow_mut().forget(id);
                self.notifier.notify(Notice::success("Todo deleted successfully"));
                true
            }
            Err(e) => {
                log::error!("{}", e);
                self.notifier.notify(Notice::error("Failed to delete todo"));
                false
            }
        }
    }

    /// Delete every currently completed todo, one request at a time.
    /// Each delete raises its own notice, as a single delete does.
    pub async fn clear_completed(&self) -> ClearReport {
        let ids = self.state.read(|s| s.completed_ids());
        let mut report = ClearReport::default();

        for id in ids {
            if self.delete(id).await {
                report.removed.push(id);
            } else {
                report.failed.push(id);
            }
        }

        if !report.failed.is_empty() {
            log::warn!("Clear completed left {:?} behind", report.failed);
        }
        report
    }

    pub fn set_filter(&self, filter: Filter) {
        self.state.update(|s| s.set_filter(filter));
    }

    async fn send_update(&self, id: TodoId, patch: TodoPatch) -> UpdateOutcome {
        let seq = self.ledger.borrow_mut().issue(id);

        match self.api.update_todo(id, &patch).await {
            Ok(todo) => {
                if !self.ledger.borrow_mut().accept(id, seq) {
                    log::debug!("Dropping stale update #{} for todo {}", seq, id);
                    return UpdateOutcome::Superseded;
                }
                self.state.update(|s| s.apply_updated(todo.clone()));
                UpdateOutcome::Applied(todo)
            }
            Err(e) => {
                log::error!("{}", e);
                self.notifier.notify(Notice::error("Failed to update todo"));
                UpdateOutcome::Failed
            }
        }
    }
}
