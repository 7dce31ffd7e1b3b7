//! Todo State Core
//!
//! DOM-free half of the todo client:
//! - model: wire records and title normalization
//! - state: local state with pure transition methods
//! - view: projection and render model
//! - remote: Remote Store trait and error taxonomy
//! - controller: gestures -> remote calls -> state updates

mod model;
mod filter;
mod state;
mod view;
mod remote;
mod sequence;
mod notice;
mod controller;

#[cfg(test)]
mod tests;

pub use model::{normalize_title, NewTodo, Todo, TodoId, TodoPatch};
pub use filter::Filter;
pub use state::{PendingKey, PendingTodo, StateCell, TodoState};
pub use view::{project, render_rows, ListView, PendingRow, TodoRow};
pub use remote::{Operation, RemoteCause, RemoteError, RemoteResult, TodoApi};
pub use sequence::RequestLedger;
pub use notice::{Notice, NoticeKind, Notifier};
pub use controller::{ClearReport, Controller, EditOutcome, Submission, UpdateOutcome};
