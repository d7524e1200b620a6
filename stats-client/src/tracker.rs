//! Stale-response guard.
//!
//! Every position change issues a new query. Responses arrive in any
//! order; one is only used if it answers the question being asked when it
//! lands. In-flight requests are never aborted, just ignored.

use crate::types::{QueryKey, StatsQuery};

/// Receipt for an issued query, handed back with its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub id: u64,
    pub key: QueryKey,
}

#[derive(Debug, Default)]
pub struct QueryTracker {
    next_id: u64,
    current: Option<QueryKey>,
    discarded: u64,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `query` as the one now relevant.
    pub fn issue(&mut self, query: &StatsQuery) -> QueryTicket {
        let key = query.key();
        let ticket = QueryTicket {
            id: self.next_id,
            key: key.clone(),
        };
        self.next_id += 1;
        self.current = Some(key);
        ticket
    }

    /// Whether a response for `ticket` may be shown. Stale responses are
    /// counted and dropped.
    pub fn accept(&mut self, ticket: &QueryTicket) -> bool {
        if self.current.as_ref() == Some(&ticket.key) {
            true
        } else {
            self.discarded += 1;
            tracing::debug!(
                "Discarding stale statistics response #{} for {}",
                ticket.id,
                ticket.key.position
            );
            false
        }
    }

    pub fn current(&self) -> Option<&QueryKey> {
        self.current.as_ref()
    }

    /// Number of stale responses dropped so far.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
