//! Access check run before any store query.

use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::errors::Error;

/// Outcome of checking whether the contact store may be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAccess {
    Granted,
    Denied(String),
}

impl StoreAccess {
    pub fn is_granted(&self) -> bool {
        matches!(self, StoreAccess::Granted)
    }

    /// Convert a denial into `Error::PermissionDenied` for `path`.
    pub fn require(self, path: &Path) -> Result<(), Error> {
        match self {
            StoreAccess::Granted => Ok(()),
            StoreAccess::Denied(reason) => Err(Error::PermissionDenied {
                path: path.to_path_buf(),
                reason,
            }),
        }
    }
}

/// Check that the store at `path` exists and can be opened read-only.
pub fn check_access(path: &Path) -> StoreAccess {
    if !path.exists() {
        return StoreAccess::Denied("contact store does not exist".to_string());
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    match Connection::open_with_flags(path, flags) {
        Ok(conn) => match conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        }) {
            Ok(_) => StoreAccess::Granted,
            Err(e) => StoreAccess::Denied(e.to_string()),
        },
        Err(e) => StoreAccess::Denied(e.to_string()),
    }
}
