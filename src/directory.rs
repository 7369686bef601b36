//! Contact directory combining the store, the starred preference and aggregation.

use log::debug;

use crate::aggregate::{ResultLimit, SEARCH_RESULT_LIMIT, aggregate};
use crate::contact_types::Contact;
use crate::errors::Error;
use crate::search::{SearchSession, Snapshot};
use crate::store::ContactStore;

/// Entry point for the read view, live search and contact lookup.
pub struct Directory {
    store: ContactStore,
    session: SearchSession,
}

impl Directory {
    pub fn new(store: ContactStore) -> Self {
        Self {
            store,
            session: SearchSession::new(),
        }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Every contact, honouring the starred-only preference.
    pub fn read(&self) -> Vec<Contact> {
        let starred_only = self.store.starred_only();
        let contacts = aggregate(self.store.query(""), starred_only, ResultLimit::Unbounded);
        debug!(
            "event=read_view starred_only={starred_only} contacts={}",
            contacts.len()
        );
        contacts
    }

    /// Run one live-search pass and return the snapshot now current.
    ///
    /// Blank text lists favourites; otherwise the starred-only preference
    /// applies. At most [`SEARCH_RESULT_LIMIT`] contacts are returned.
    pub fn search(&self, text: &str) -> Snapshot {
        let ticket = self.session.begin();
        let starred_only = text.trim().is_empty() || self.store.starred_only();
        let contacts = aggregate(
            self.store.query(text),
            starred_only,
            ResultLimit::AtMost(SEARCH_RESULT_LIMIT),
        );
        self.session.publish(ticket, text, contacts);
        self.session.current()
    }

    /// Look up one contact by exact display name, ignoring the preference.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no row carries that name.
    pub fn contact(&self, name: &str) -> Result<Contact, Error> {
        aggregate(self.store.query(name), false, ResultLimit::Unbounded)
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }
}
