//! Controller Integration Tests
//!
//! Drives the controller against an in-memory fake of the todo API.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::{HashSet, VecDeque};
    use std::rc::Rc;

    use async_trait::async_trait;
    use futures::channel::oneshot;

    use crate::{
        project, Controller, EditOutcome, Filter, Notice, Operation, RemoteError, RemoteResult,
        Submission, Todo, TodoApi, TodoId, TodoPatch, TodoState, UpdateOutcome,
    };

    /// In-memory server with switches for failures and delayed responses
    #[derive(Default)]
    struct FakeApi {
        todos: RefCell<Vec<Todo>>,
        next_id: Cell<TodoId>,
        calls: RefCell<Vec<String>>,
        offline: Cell<bool>,
        failing_deletes: RefCell<HashSet<TodoId>>,
        list_gate: RefCell<Option<oneshot::Receiver<()>>>,
        create_gate: RefCell<Option<oneshot::Receiver<()>>>,
        update_gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
    }

    impl FakeApi {
        fn with_todos(todos: Vec<Todo>) -> Self {
            let next = todos.iter().map(|t| t.id).max().unwrap_or(0);
            let api = Self::default();
            *api.todos.borrow_mut() = todos;
            api.next_id.set(next);
            api
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn check_online(&self, operation: Operation) -> RemoteResult<()> {
            if self.offline.get() {
                Err(RemoteError::network(operation, "connection refused"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait(?Send)]
    impl TodoApi for FakeApi {
        async fn list_todos(&self) -> RemoteResult<Vec<Todo>> {
            self.calls.borrow_mut().push("GET".to_string());
            self.check_online(Operation::List)?;
            // snapshot is taken when the request is served, not when it returns
            let snapshot = self.todos.borrow().clone();
            let gate = self.list_gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(snapshot)
        }

        async fn create_todo(&self, title: &str) -> RemoteResult<Todo> {
            self.calls.borrow_mut().push("POST".to_string());
            let gate = self.create_gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.check_online(Operation::Create)?;
            self.next_id.set(self.next_id.get() + 1);
            let todo = Todo::new(self.next_id.get(), title);
            self.todos.borrow_mut().push(todo.clone());
            Ok(todo)
        }

        async fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RemoteResult<Todo> {
            self.calls.borrow_mut().push(format!("PUT {}", id));
            self.check_online(Operation::Update)?;
            let updated = {
                let mut todos = self.todos.borrow_mut();
                let todo = todos
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or_else(|| RemoteError::rejected(Operation::Update, 404))?;
                if let Some(title) = &patch.title {
                    todo.title = title.clone();
                }
                if let Some(completed) = patch.completed {
                    todo.completed = completed;
                }
                todo.clone()
            };
            let gate = self.update_gates.borrow_mut().pop_front();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(updated)
        }

        async fn delete_todo(&self, id: TodoId) -> RemoteResult<()> {
            self.calls.borrow_mut().push(format!("DELETE {}", id));
            self.check_online(Operation::Delete)?;
            if self.failing_deletes.borrow().contains(&id) {
                return Err(RemoteError::rejected(Operation::Delete, 500));
            }
            let mut todos = self.todos.borrow_mut();
            let before = todos.len();
            todos.retain(|t| t.id != id);
            if todos.len() == before {
                return Err(RemoteError::rejected(Operation::Delete, 404));
            }
            Ok(())
        }
    }

    type TestController = Controller<FakeApi, Rc<RefCell<TodoState>>, Rc<RefCell<Vec<Notice>>>>;

    struct Harness {
        ctl: TestController,
        state: Rc<RefCell<TodoState>>,
        notices: Rc<RefCell<Vec<Notice>>>,
    }

    impl Harness {
        fn new(api: FakeApi) -> Self {
            let state = Rc::new(RefCell::new(TodoState::new()));
            let notices = Rc::new(RefCell::new(Vec::new()));
            let ctl = Controller::new(api, state.clone(), notices.clone());
            Self { ctl, state, notices }
        }

        async fn loaded(todos: Vec<Todo>) -> Self {
            let harness = Self::new(FakeApi::with_todos(todos));
            assert!(harness.ctl.load().await);
            harness
        }

        fn todos(&self) -> Vec<Todo> {
            self.state.borrow().todos().to_vec()
        }

        fn visible(&self) -> Vec<Todo> {
            project(&self.state.borrow())
        }

        fn server_todos(&self) -> Vec<Todo> {
            self.ctl.api().todos.borrow().clone()
        }

        fn last_notice(&self) -> Option<Notice> {
            self.notices.borrow().last().cloned()
        }
    }

    fn done(id: TodoId, title: &str) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            completed: true,
        }
    }

    #[tokio::test]
    async fn test_load_populates_state() {
        let h = Harness::loaded(vec![Todo::new(1, "a"), done(2, "b")]).await;
        assert_eq!(h.todos(), vec![Todo::new(1, "a"), done(2, "b")]);
        assert!(!h.state.borrow().is_loading());
        assert!(h.notices.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_shows_error_and_keeps_state() {
        let api = FakeApi::with_todos(vec![Todo::new(1, "a")]);
        api.offline.set(true);
        let h = Harness::new(api);

        assert!(!h.ctl.load().await);
        assert!(h.todos().is_empty());
        assert!(!h.state.borrow().is_loading());
        assert_eq!(h.last_notice(), Some(Notice::error("Failed to load todos")));
    }

    #[tokio::test]
    async fn test_create_during_load_survives_older_list() {
        let h = Harness::new(FakeApi::with_todos(vec![Todo::new(1, "a")]));
        let (release, gate) = oneshot::channel();
        *h.ctl.api().list_gate.borrow_mut() = Some(gate);

        let mut load = Box::pin(h.ctl.load());
        assert!(futures::poll!(load.as_mut()).is_pending());
        assert!(h.state.borrow().is_loading());

        assert!(matches!(h.ctl.submit("typed while loading").await, Submission::Created(_)));
        assert_eq!(h.ctl.toggle(2).await, UpdateOutcome::Applied(done(2, "typed while loading")));

        release.send(()).unwrap();
        assert!(load.await);
        assert!(!h.state.borrow().is_loading());
        assert_eq!(h.todos(), h.server_todos());
        assert_eq!(h.todos(), vec![Todo::new(1, "a"), done(2, "typed while loading")]);
    }

    #[tokio::test]
    async fn test_delete_during_load_stays_deleted() {
        let h = Harness::new(FakeApi::with_todos(vec![Todo::new(1, "a")]));
        h.ctl.api().todos.borrow_mut().push(Todo::new(2, "b"));
        h.ctl.api().next_id.set(2);
        let (release, gate) = oneshot::channel();
        *h.ctl.api().list_gate.borrow_mut() = Some(gate);

        let mut load = Box::pin(h.ctl.load());
        assert!(futures::poll!(load.as_mut()).is_pending());

        // id 2 is already in the list snapshot the server handed out
        assert!(h.ctl.delete(2).await);
        h.ctl.submit("c").await;
        assert!(h.ctl.delete(3).await);

        release.send(()).unwrap();
        assert!(load.await);
        assert_eq!(h.todos(), vec![Todo::new(1, "a")]);
        assert_eq!(h.todos(), h.server_todos());
    }

    #[tokio::test]
    async fn test_buy_milk_scenario() {
        let h = Harness::loaded(Vec::new()).await;

        let outcome = h.ctl.submit("Buy milk").await;
        assert_eq!(outcome, Submission::Created(Todo::new(1, "Buy milk")));
        assert_eq!(h.todos(), vec![Todo::new(1, "Buy milk")]);
        assert_eq!(h.last_notice(), Some(Notice::success("Todo created successfully")));

        assert_eq!(h.ctl.toggle(1).await, UpdateOutcome::Applied(done(1, "Buy milk")));
        assert!(h.todos()[0].completed);

        h.ctl.set_filter(Filter::Active);
        assert!(h.visible().is_empty());

        h.ctl.set_filter(Filter::Completed);
        assert_eq!(h.visible(), vec![done(1, "Buy milk")]);
    }

    #[tokio::test]
    async fn test_blank_submission_is_ignored() {
        let h = Harness::loaded(Vec::new()).await;
        assert_eq!(h.ctl.submit("   \t").await, Submission::Ignored);
        assert_eq!(h.ctl.api().calls(), vec!["GET"]);
        assert!(h.notices.borrow().is_empty());
        assert!(h.state.borrow().pending().is_empty());
    }

    #[tokio::test]
    async fn test_submission_is_trimmed() {
        let h = Harness::loaded(Vec::new()).await;
        h.ctl.submit("  Walk dog  ").await;
        assert_eq!(h.todos()[0].title, "Walk dog");
    }

    #[tokio::test]
    async fn test_create_failure_leaves_state() {
        let h = Harness::loaded(vec![Todo::new(1, "a")]).await;
        h.ctl.api().offline.set(true);

        assert_eq!(h.ctl.submit("b").await, Submission::Failed);
        assert_eq!(h.todos(), vec![Todo::new(1, "a")]);
        assert!(h.state.borrow().pending().is_empty());
        assert_eq!(h.last_notice(), Some(Notice::error("Failed to create todo")));
    }

    #[tokio::test]
    async fn test_pending_row_shown_while_create_in_flight() {
        let h = Harness::loaded(Vec::new()).await;
        let (release, gate) = oneshot::channel();
        *h.ctl.api().create_gate.borrow_mut() = Some(gate);

        let mut submit = Box::pin(h.ctl.submit("Buy milk"));
        assert!(futures::poll!(submit.as_mut()).is_pending());
        assert_eq!(h.state.borrow().pending()[0].title, "Buy milk");
        assert!(h.todos().is_empty());

        release.send(()).unwrap();
        assert!(matches!(submit.await, Submission::Created(_)));
        assert!(h.state.borrow().pending().is_empty());
        assert_eq!(h.todos().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_before_create_returns_applies_to_new_id() {
        let h = Harness::loaded(Vec::new()).await;
        let (release, gate) = oneshot::channel();
        *h.ctl.api().create_gate.borrow_mut() = Some(gate);

        let mut submit = Box::pin(h.ctl.submit("Oops"));
        assert!(futures::poll!(submit.as_mut()).is_pending());

        let key = h.state.borrow().pending()[0].key;
        assert!(h.ctl.delete_pending(key));

        release.send(()).unwrap();
        assert_eq!(submit.await, Submission::Discarded(1));
        assert!(h.todos().is_empty());
        assert!(h.ctl.api().todos.borrow().is_empty());
        assert_eq!(h.ctl.api().calls(), vec!["GET", "POST", "DELETE 1"]);
    }

    #[tokio::test]
    async fn test_failed_follow_up_delete_keeps_created_todo() {
        let h = Harness::loaded(Vec::new()).await;
        let (release, gate) = oneshot::channel();
        *h.ctl.api().create_gate.borrow_mut() = Some(gate);
        h.ctl.api().failing_deletes.borrow_mut().insert(1);

        let mut submit = Box::pin(h.ctl.submit("Sticky"));
        assert!(futures::poll!(submit.as_mut()).is_pending());
        let key = h.state.borrow().pending()[0].key;
        h.ctl.delete_pending(key);
        release.send(()).unwrap();

        assert_eq!(submit.await, Submission::Created(Todo::new(1, "Sticky")));
        assert_eq!(h.todos(), vec![Todo::new(1, "Sticky")]);
        assert_eq!(h.last_notice(), Some(Notice::error("Failed to delete todo")));
    }

    #[tokio::test]
    async fn test_toggle_failure_leaves_todo_unchanged() {
        let h = Harness::loaded(vec![Todo::new(1, "a")]).await;
        h.ctl.api().offline.set(true);

        assert_eq!(h.ctl.toggle(1).await, UpdateOutcome::Failed);
        assert!(!h.todos()[0].completed);
        assert_eq!(h.last_notice(), Some(Notice::error("Failed to update todo")));
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_sends_nothing() {
        let h = Harness::loaded(Vec::new()).await;
        assert_eq!(h.ctl.toggle(5).await, UpdateOutcome::Failed);
        assert_eq!(h.ctl.api().calls(), vec!["GET"]);
    }

    #[tokio::test]
    async fn test_edit_commit_updates_title() {
        let h = Harness::loaded(vec![Todo::new(1, "old")]).await;
        assert!(h.ctl.begin_edit(1));
        assert_eq!(h.state.borrow().editing_id(), Some(1));

        let outcome = h.ctl.commit_edit(1, "  new  ").await;
        assert_eq!(outcome, EditOutcome::Saved(UpdateOutcome::Applied(Todo::new(1, "new"))));
        assert_eq!(h.todos()[0].title, "new");
        assert_eq!(h.state.borrow().editing_id(), None);
    }

    #[tokio::test]
    async fn test_whitespace_commit_behaves_as_cancel() {
        let h = Harness::loaded(vec![Todo::new(1, "keep")]).await;
        h.ctl.begin_edit(1);

        assert_eq!(h.ctl.commit_edit(1, "   ").await, EditOutcome::Cancelled);
        assert_eq!(h.ctl.api().calls(), vec!["GET"]);
        assert_eq!(h.state.borrow().editing_id(), None);
        assert_eq!(h.todos()[0].title, "keep");
    }

    #[tokio::test]
    async fn test_cancel_edit_sends_nothing() {
        let h = Harness::loaded(vec![Todo::new(1, "keep")]).await;
        h.ctl.begin_edit(1);
        h.ctl.cancel_edit();
        assert_eq!(h.state.borrow().editing_id(), None);
        assert_eq!(h.ctl.api().calls(), vec!["GET"]);
    }

    #[tokio::test]
    async fn test_todo_stays_in_edit_mode_while_update_in_flight() {
        let h = Harness::loaded(vec![Todo::new(1, "old")]).await;
        let (release, gate) = oneshot::channel();
        h.ctl.api().update_gates.borrow_mut().push_back(gate);
        h.ctl.begin_edit(1);

        let mut commit = Box::pin(h.ctl.commit_edit(1, "new"));
        assert!(futures::poll!(commit.as_mut()).is_pending());
        assert_eq!(h.state.borrow().editing_id(), Some(1));

        // blur fired while the update is in flight
        assert_eq!(h.ctl.commit_edit(1, "new").await, EditOutcome::NotEditing);

        release.send(()).unwrap();
        assert!(matches!(commit.await, EditOutcome::Saved(UpdateOutcome::Applied(_))));
        assert_eq!(h.state.borrow().editing_id(), None);
        assert_eq!(h.todos()[0].title, "new");
        assert_eq!(h.ctl.api().calls(), vec!["GET", "PUT 1"]);
    }

    #[tokio::test]
    async fn test_blur_after_enter_does_not_commit_twice() {
        let h = Harness::loaded(vec![Todo::new(1, "old")]).await;
        h.ctl.begin_edit(1);

        h.ctl.commit_edit(1, "new").await;
        assert_eq!(h.ctl.commit_edit(1, "new").await, EditOutcome::NotEditing);
        assert_eq!(h.ctl.api().calls(), vec!["GET", "PUT 1"]);
    }

    #[tokio::test]
    async fn test_failed_edit_still_returns_to_idle() {
        let h = Harness::loaded(vec![Todo::new(1, "old")]).await;
        h.ctl.begin_edit(1);
        h.ctl.api().offline.set(true);

        assert_eq!(h.ctl.commit_edit(1, "new").await, EditOutcome::Saved(UpdateOutcome::Failed));
        assert_eq!(h.todos()[0].title, "old");
        assert_eq!(h.state.borrow().editing_id(), None);
    }

    #[tokio::test]
    async fn test_out_of_order_update_responses_keep_latest() {
        let h = Harness::loaded(vec![Todo::new(1, "start")]).await;
        let (release_first, first_gate) = oneshot::channel();
        let (release_second, second_gate) = oneshot::channel();
        h.ctl.api().update_gates.borrow_mut().extend([first_gate, second_gate]);

        h.ctl.begin_edit(1);
        let mut first = Box::pin(h.ctl.commit_edit(1, "first"));
        assert!(futures::poll!(first.as_mut()).is_pending());

        h.ctl.begin_edit(1);
        let mut second = Box::pin(h.ctl.commit_edit(1, "second"));
        assert!(futures::poll!(second.as_mut()).is_pending());

        release_second.send(()).unwrap();
        assert!(matches!(second.await, EditOutcome::Saved(UpdateOutcome::Applied(_))));
        release_first.send(()).unwrap();
        assert_eq!(first.await, EditOutcome::Saved(UpdateOutcome::Superseded));

        assert_eq!(h.todos()[0].title, "second");
    }

    #[tokio::test]
    async fn test_delete_removes_todo() {
        let h = Harness::loaded(vec![Todo::new(1, "a"), Todo::new(2, "b")]).await;
        assert!(h.ctl.delete(1).await);
        assert_eq!(h.todos(), vec![Todo::new(2, "b")]);
        assert_eq!(h.last_notice(), Some(Notice::success("Todo deleted successfully")));
    }

    #[tokio::test]
    async fn test_double_delete_is_non_fatal() {
        let h = Harness::loaded(vec![Todo::new(1, "a")]).await;
        assert!(h.ctl.delete(1).await);
        assert!(!h.ctl.delete(1).await);

        assert!(h.todos().is_empty());
        assert_eq!(h.last_notice(), Some(Notice::error("Failed to delete todo")));
        // still usable afterwards
        assert!(matches!(h.ctl.submit("next").await, Submission::Created(_)));
    }

    #[tokio::test]
    async fn test_delete_of_id_removed_server_side() {
        let h = Harness::loaded(vec![Todo::new(1, "a"), Todo::new(2, "b")]).await;
        h.ctl.api().todos.borrow_mut().retain(|t| t.id != 2);

        assert!(!h.ctl.delete(2).await);
        assert_eq!(h.todos().len(), 2);
        assert!(h.last_notice().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_clear_completed_continues_past_failures() {
        let h = Harness::loaded(vec![done(1, "a"), Todo::new(2, "b"), done(3, "c"), done(4, "d")]).await;
        h.ctl.api().failing_deletes.borrow_mut().insert(3);

        let report = h.ctl.clear_completed().await;
        assert_eq!(report.removed, vec![1, 4]);
        assert_eq!(report.failed, vec![3]);
        assert_eq!(h.todos(), vec![Todo::new(2, "b"), done(3, "c")]);
        assert_eq!(h.ctl.api().calls(), vec!["GET", "DELETE 1", "DELETE 3", "DELETE 4"]);

        assert_eq!(
            *h.notices.borrow(),
            vec![
                Notice::success("Todo deleted successfully"),
                Notice::error("Failed to delete todo"),
                Notice::success("Todo deleted successfully"),
            ]
        );
    }

    #[tokio::test]
    async fn test_clear_completed_with_nothing_completed() {
        let h = Harness::loaded(vec![Todo::new(1, "a")]).await;
        let report = h.ctl.clear_completed().await;
        assert!(report.removed.is_empty() && report.failed.is_empty());
        assert!(h.notices.borrow().is_empty());
    }
}
