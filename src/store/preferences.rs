//! Persisted user preferences.

use log::{info, warn};
use rusqlite::{OptionalExtension, params};

use super::ContactStore;
use crate::errors::Error;

const PREF_FAVORITES_ONLY: &str = "filter_favorites_only";

impl ContactStore {
    /// Whether only starred contacts should be shown. Defaults to `false`.
    pub fn starred_only(&self) -> bool {
        match self.get_preference(PREF_FAVORITES_ONLY) {
            Ok(Some(value)) => value == "true",
            Ok(None) => false,
            Err(e) => {
                warn!("event=preference_read status=failed key={PREF_FAVORITES_ONLY} error={e}");
                false
            }
        }
    }

    /// Persist the starred-only preference.
    pub fn set_starred_only(&self, starred_only: bool) -> Result<(), Error> {
        self.set_preference(PREF_FAVORITES_ONLY, if starred_only { "true" } else { "false" })?;
        info!("event=preference_write key={PREF_FAVORITES_ONLY} value={starred_only}");
        Ok(())
    }

    fn get_preference(&self, key: &str) -> Result<Option<String>, Error> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_preference(&self, key: &str, value: &str) -> Result<(), Error> {
        self.conn.execute(
            r#"
            INSERT INTO preferences (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }
}
