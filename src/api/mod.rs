//! Remote Todo API
//!
//! HTTP implementation of the `TodoApi` trait, organized like the endpoints:
//! shared request plumbing here, one operation per method in `todo`.

mod todo;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use todo_state::{Operation, RemoteError, RemoteResult, TodoId};

/// Todo collection behind `{base}/todos`
#[derive(Debug, Clone)]
pub struct HttpTodoStore {
    client: Client,
    base_url: String,
}

impl HttpTodoStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item_url(&self, id: TodoId) -> String {
        format!("{}/todos/{}", self.base_url, id)
    }
}

// ========================
// Request Helpers
// ========================

/// Send and require a 2xx status; the body is left unread
async fn send(operation: Operation, request: RequestBuilder) -> RemoteResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| RemoteError::network(operation, e.to_string()))?;
    check_status(operation, response.status().as_u16())?;
    Ok(response)
}

/// Send, require a 2xx status and decode the JSON body
async fn send_json<T: DeserializeOwned>(operation: Operation, request: RequestBuilder) -> RemoteResult<T> {
    send(operation, request)
        .await?
        .json::<T>()
        .await
        .map_err(|e| RemoteError::decode(operation, e.to_string()))
}

/// Any non-2xx status is a failure, whatever the body says
fn check_status(operation: Operation, status: u16) -> RemoteResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(RemoteError::rejected(operation, status))
    }
}
