//! Demo contacts for an empty store.
//!
//! Addresses around the Googleplex so an emulator's default location sits
//! in the middle of them.

use crate::contact_types::{Address, Contact};
use crate::errors::Error;

use super::ContactStore;

const COUNTRY: &str = "United States";
const CITY: &str = "Mountain View";

/// The demo contacts written by [`seed_demo_contacts`].
pub fn demo_contacts() -> Vec<Contact> {
    let at = |street: &str| Address::new(street, CITY, COUNTRY);
    vec![
        Contact::new("[FAKE] Starbucks", true).with_addresses([
            at("1380 Pear Ave"),
            at("2410 Charleston Rd"),
            at("580 N Rengstorff Ave"),
        ]),
        Contact::new("[FAKE] Seven Eleven", false).with_addresses([
            at("1380 Pear Ave"),
            at("1951 Old Middlefield Way"),
            at("2640 California St"),
        ]),
        Contact::new("[FAKE] Pizza Delivery", false).with_addresses([at("327 Moffett Blvd")]),
    ]
}

/// Insert the demo contacts; returns the number of address rows written.
pub fn seed_demo_contacts(store: &ContactStore) -> Result<usize, Error> {
    let mut written = 0;
    for contact in demo_contacts() {
        written += store.insert_contact(&contact)?;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{ResultLimit, aggregate};

    #[test]
    fn test_seed_round_trips_through_aggregation() {
        let store = ContactStore::open_in_memory().unwrap();
        assert_eq!(seed_demo_contacts(&store).unwrap(), 7);

        let contacts = aggregate(store.query(""), false, ResultLimit::Unbounded);
        let names: Vec<_> = contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "[FAKE] Pizza Delivery",
                "[FAKE] Seven Eleven",
                "[FAKE] Starbucks"
            ]
        );
        assert_eq!(contacts[2].addresses.len(), 3);
        assert!(contacts[2].starred);
    }
}
