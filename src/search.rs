//! Search sessions publishing immutable result snapshots.
//!
//! Each keystroke starts a new pass. A pass takes a ticket before it queries
//! the store and publishes with that ticket when done; a pass that finishes
//! after a newer one has already been published is discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use crate::contact_types::Contact;

/// Read-only result list handed to the display layer.
pub type Snapshot = Arc<[Contact]>;

/// Generation number of one search pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

struct Published {
    generation: u64,
    query: String,
    contacts: Snapshot,
}

/// Holds the latest published search result.
pub struct SearchSession {
    issued: AtomicU64,
    published: Mutex<Published>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            published: Mutex::new(Published {
                generation: 0,
                query: String::new(),
                contacts: Arc::from(Vec::new()),
            }),
        }
    }

    /// Start a pass. Tickets are strictly increasing.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Install `contacts` as the current result unless a newer pass already
    /// published. Returns whether the snapshot was installed.
    pub fn publish(&self, ticket: SearchTicket, query: &str, contacts: Vec<Contact>) -> bool {
        let mut published = self.published.lock().unwrap_or_else(PoisonError::into_inner);
        if ticket.0 <= published.generation {
            debug!(
                "event=search_publish status=stale generation={} current={} query={query:?}",
                ticket.0, published.generation
            );
            return false;
        }
        debug!(
            "event=search_publish status=ok generation={} results={} query={query:?}",
            ticket.0,
            contacts.len()
        );
        *published = Published {
            generation: ticket.0,
            query: query.to_string(),
            contacts: Arc::from(contacts),
        };
        true
    }

    /// The current snapshot.
    pub fn current(&self) -> Snapshot {
        let published = self.published.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&published.contacts)
    }

    /// Query text of the current snapshot.
    pub fn current_query(&self) -> String {
        let published = self.published.lock().unwrap_or_else(PoisonError::into_inner);
        published.query.clone()
    }

    /// Generation of the current snapshot; 0 before anything is published.
    pub fn published_generation(&self) -> u64 {
        let published = self.published.lock().unwrap_or_else(PoisonError::into_inner);
        published.generation
    }
}
