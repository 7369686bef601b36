//! Read-only postal-address query.

use log::{debug, warn};
use rusqlite::params;

use super::ContactStore;
use crate::contact_types::RawContactRow;
use crate::errors::Error;

/// Rows produced by one store query.
///
/// Consumed once; issue a new query to iterate again.
pub struct RowSet {
    rows: std::vec::IntoIter<RawContactRow>,
}

impl RowSet {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new().into_iter(),
        }
    }
}

impl Iterator for RowSet {
    type Item = RawContactRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for RowSet {}

impl ContactStore {
    /// Query postal-address rows, ordered by display name then row id.
    ///
    /// A blank `filter` returns every row. Otherwise only rows whose display
    /// name contains `filter` as a case-sensitive substring are returned.
    /// Store failures are logged and yield an empty set.
    pub fn query(&self, filter: &str) -> RowSet {
        match self.try_query(filter) {
            Ok(rows) => {
                debug!("event=store_query filter={:?} rows={}", filter, rows.len());
                RowSet {
                    rows: rows.into_iter(),
                }
            }
            Err(e) => {
                warn!("event=store_query status=failed filter={:?} error={}", filter, e);
                RowSet::empty()
            }
        }
    }

    fn try_query(&self, filter: &str) -> Result<Vec<RawContactRow>, Error> {
        let needle = if filter.trim().is_empty() { "" } else { filter };

        // instr() is case-sensitive and treats `%` and `_` literally.
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, display_name, starred, street, city, country
            FROM postal_addresses
            WHERE ?1 = '' OR instr(display_name, ?1) > 0
            ORDER BY display_name ASC, id ASC
            "#,
        )?;

        let rows = stmt
            .query_map(params![needle], |row| {
                Ok(RawContactRow {
                    id: row.get(0)?,
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    starred: row.get::<_, Option<i64>>(2)?.unwrap_or(0) == 1,
                    street: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    city: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    country: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact_types::{Address, Contact};

    fn store_with(contacts: &[Contact]) -> ContactStore {
        let store = ContactStore::open_in_memory().unwrap();
        for contact in contacts {
            store.insert_contact(contact).unwrap();
        }
        store
    }

    fn contact(name: &str, starred: bool, streets: &[&str]) -> Contact {
        Contact::new(name, starred)
            .with_addresses(streets.iter().map(|s| Address::new(*s, "Town", "US")))
    }

    #[test]
    fn test_blank_filter_returns_all_sorted() {
        let store = store_with(&[
            contact("Charlie", false, &["3 C St"]),
            contact("Alpha", true, &["1 A St", "2 A St"]),
            contact("Bravo", false, &["9 B St"]),
        ]);

        let names: Vec<_> = store.query("").map(|r| r.name).collect();
        assert_eq!(names, vec!["Alpha", "Alpha", "Bravo", "Charlie"]);

        let names: Vec<_> = store.query("   ").map(|r| r.name).collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_rows_within_name_keep_insert_order() {
        let store = store_with(&[contact("Alpha", false, &["9 Z St", "1 A St"])]);
        let streets: Vec<_> = store.query("").map(|r| r.street).collect();
        assert_eq!(streets, vec!["9 Z St", "1 A St"]);
    }

    #[test]
    fn test_filter_is_case_sensitive_substring() {
        let store = store_with(&[
            contact("Starbucks", true, &["1 A St"]),
            contact("Seven Eleven", false, &["2 B St"]),
        ]);

        let names: Vec<_> = store.query("bucks").map(|r| r.name).collect();
        assert_eq!(names, vec!["Starbucks"]);

        assert_eq!(store.query("BUCKS").count(), 0);
        assert_eq!(store.query("e").count(), 1);
    }

    #[test]
    fn test_filter_wildcards_are_literal() {
        let store = store_with(&[
            contact("100% Pizza", false, &["1 A St"]),
            contact("Pizza", false, &["2 B St"]),
        ]);
        let names: Vec<_> = store.query("%").map(|r| r.name).collect();
        assert_eq!(names, vec!["100% Pizza"]);
        assert_eq!(store.query("_").count(), 0);
    }

    #[test]
    fn test_null_columns_become_empty_strings() {
        let store = ContactStore::open_in_memory().unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO postal_addresses (display_name, starred, street, city, country)
                 VALUES (NULL, NULL, NULL, 'Town', NULL)",
                [],
            )
            .unwrap();

        let rows: Vec<_> = store.query("").collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "");
        assert!(!rows[0].starred);
        assert_eq!(rows[0].street, "");
        assert_eq!(rows[0].city, "Town");
        assert_eq!(rows[0].country, "");
    }

    #[test]
    fn test_store_failure_yields_no_rows() {
        let store = store_with(&[contact("Alpha", false, &["1 A St"])]);
        store
            .conn()
            .execute_batch("DROP TABLE postal_addresses;")
            .unwrap();

        assert_eq!(store.query("").count(), 0);
        assert_eq!(store.query("Alpha").count(), 0);
    }
}
