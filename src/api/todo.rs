//! Todo Endpoints
//!
//! | op     | method | path          |
//! |--------|--------|---------------|
//! | list   | GET    | /todos        |
//! | create | POST   | /todos        |
//! | update | PUT    | /todos/{id}   |
//! | delete | DELETE | /todos/{id}   |

use async_trait::async_trait;
use todo_state::{NewTodo, Operation, RemoteResult, Todo, TodoApi, TodoId, TodoPatch};

use super::{send, send_json, HttpTodoStore};

#[async_trait(?Send)]
impl TodoApi for HttpTodoStore {
    async fn list_todos(&self) -> RemoteResult<Vec<Todo>> {
        let request = self.client.get(self.collection_url());
        send_json(Operation::List, request).await
    }

    async fn create_todo(&self, title: &str) -> RemoteResult<Todo> {
        let request = self.client.post(self.collection_url()).json(&NewTodo { title });
        send_json(Operation::Create, request).await
    }

    async fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RemoteResult<Todo> {
        let request = self.client.put(self.item_url(id)).json(patch);
        send_json(Operation::Update, request).await
    }

    async fn delete_todo(&self, id: TodoId) -> RemoteResult<()> {
        let request = self.client.delete(self.item_url(id));
        send(Operation::Delete, request).await.map(|_| ())
    }
}
