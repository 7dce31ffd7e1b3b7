//! Update Sequencing
//!
//! Tags every update request with a per-record sequence number so a response
//! that arrives after a newer one has been applied is dropped.

use std::collections::HashMap;

use crate::model::TodoId;

#[derive(Debug, Default)]
pub struct RequestLedger {
    issued: HashMap<TodoId, u64>,
    applied: HashMap<TodoId, u64>,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number for a request about to be sent for `id`
    pub fn issue(&mut self, id: TodoId) -> u64 {
        let seq = self.issued.entry(id).or_insert(0);
        *seq += 1;
        *seq
    }

    /// Record that the response to `seq` arrived. Returns false when a newer
    /// response for the same record was already applied.
    pub fn accept(&mut self, id: TodoId, seq: u64) -> bool {
        let last = self.applied.entry(id).or_insert(0);
        if seq > *last {
            *last = seq;
            true
        } else {
            false
        }
    }

    /// Drop bookkeeping for a deleted record
    pub fn forget(&mut self, id: TodoId) {
        self.issued.remove(&id);
        self.applied.remove(&id);
    }
}
