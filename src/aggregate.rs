//! Folding raw postal-address rows into deduplicated contacts.

use std::collections::HashMap;

use crate::contact_types::{Contact, RawContactRow};

/// Maximum number of contacts shown by the live-search view.
pub const SEARCH_RESULT_LIMIT: usize = 6;

/// Upper bound on the number of contacts an aggregation pass returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLimit {
    Unbounded,
    AtMost(usize),
}

impl ResultLimit {
    /// Convert a signed limit; negative values collapse to `AtMost(0)`.
    pub fn from_signed(limit: i64) -> Self {
        match usize::try_from(limit) {
            Ok(n) => ResultLimit::AtMost(n),
            Err(_) => ResultLimit::AtMost(0),
        }
    }
}

/// Fold `rows` into contacts keyed by display name.
///
/// Rows are consumed in order. The first row seen for a name decides the
/// contact's position and starred flag; later rows only contribute addresses
/// not already present. With `starred_only`, rows whose starred flag is false
/// contribute nothing. The result is truncated to `limit` contacts.
pub fn aggregate<I>(rows: I, starred_only: bool, limit: ResultLimit) -> Vec<Contact>
where
    I: IntoIterator<Item = RawContactRow>,
{
    let mut contacts: Vec<Contact> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for row in rows {
        if starred_only && !row.starred {
            continue;
        }

        let address = row.address();
        match by_name.get(&row.name) {
            Some(&idx) => {
                contacts[idx].add_address(address);
            }
            None => {
                let mut contact = Contact::new(row.name.clone(), row.starred);
                contact.add_address(address);
                by_name.insert(row.name, contacts.len());
                contacts.push(contact);
            }
        }
    }

    if let ResultLimit::AtMost(n) = limit {
        contacts.truncate(n);
    }
    contacts
}
