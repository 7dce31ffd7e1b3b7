//! Remote Store
//!
//! Abstract interface to the todo HTTP API. The browser build implements it
//! over HTTP; tests use an in-memory fake.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Todo, TodoId, TodoPatch};

/// Which remote call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list todos",
            Operation::Create => "create todo",
            Operation::Update => "update todo",
            Operation::Delete => "delete todo",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying reason, kept for diagnostics only
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteCause {
    /// Request could not be sent or no response arrived
    #[error("network failure: {0}")]
    Network(String),
    /// Non-2xx status
    #[error("server rejected request with status {0}")]
    Rejected(u16),
    /// 2xx with a body that is not the expected JSON
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Uniform failure of any Remote Store operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {cause}")]
pub struct RemoteError {
    pub operation: Operation,
    #[source]
    pub cause: RemoteCause,
}

impl RemoteError {
    pub fn new(operation: Operation, cause: RemoteCause) -> Self {
        Self { operation, cause }
    }

    pub fn network(operation: Operation, message: impl Into<String>) -> Self {
        Self::new(operation, RemoteCause::Network(message.into()))
    }

    pub fn rejected(operation: Operation, status: u16) -> Self {
        Self::new(operation, RemoteCause::Rejected(status))
    }

    pub fn decode(operation: Operation, message: impl Into<String>) -> Self {
        Self::new(operation, RemoteCause::Decode(message.into()))
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// CRUD over the remote todo collection.
///
/// No retries, no cancellation: each call is one request and its failure is
/// returned as-is. Futures are `!Send` so browser fetch can back them.
#[async_trait(?Send)]
pub trait TodoApi {
    async fn list_todos(&self) -> RemoteResult<Vec<Todo>>;

    /// Server assigns the id
    async fn create_todo(&self, title: &str) -> RemoteResult<Todo>;

    /// Server returns the full updated record
    async fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RemoteResult<Todo>;

    async fn delete_todo(&self, id: TodoId) -> RemoteResult<()>;
}
