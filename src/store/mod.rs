//! SQLite-backed contact store.
//!
//! This module provides:
//! - `ContactStore`: connection, schema and write operations
//! - `query`: the read-only postal-address query feeding aggregation
//! - `access`: the permission check callers run before querying
//! - `preferences`: persisted user settings
//! - `seed`: demo contacts for a fresh store

pub mod access;
pub mod preferences;
pub mod query;
pub mod seed;

use log::info;
use rusqlite::{Connection, params};
use std::path::Path;

use crate::contact_types::Contact;
use crate::errors::Error;

pub use self::query::RowSet;

/// SQLite address book holding one row per postal address.
pub struct ContactStore {
    conn: Connection,
}

/// Initialize database schema.
///
/// Every text column is nullable, as in the platform address book; the
/// query layer normalizes NULLs.
fn create_schema(conn: &Connection) -> Result<(), Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS postal_addresses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            display_name TEXT,
            starred INTEGER,
            street TEXT,
            city TEXT,
            country TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_postal_addresses_name
            ON postal_addresses(display_name);

        CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

impl ContactStore {
    /// Open or create a contact store at the given path.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or schema initialization fails.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory store (used by tests and dry runs).
    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Insert one row per address of `contact`.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty or the write fails.
    pub fn insert_contact(&self, contact: &Contact) -> Result<usize, Error> {
        if contact.name.trim().is_empty() {
            return Err(Error::InvalidInput("contact name cannot be empty".into()));
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO postal_addresses (display_name, starred, street, city, country)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for address in &contact.addresses {
                stmt.execute(params![
                    &contact.name,
                    contact.starred as i64,
                    &address.street,
                    &address.city,
                    &address.country
                ])?;
            }
        }
        tx.commit()?;

        info!(
            "event=contact_insert name={:?} addresses={}",
            contact.name,
            contact.addresses.len()
        );
        Ok(contact.addresses.len())
    }

    /// Number of postal-address rows in the store.
    pub fn row_count(&self) -> Result<i64, Error> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM postal_addresses", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get internal connection (for internal use, e.g., tests).
    #[allow(dead_code)] // Used in query.rs tests
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}
