//! Error types for nav2contacts.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for nav2contacts operations.
///
/// Aggregation never produces one of these; store and geocoder failures are
/// absorbed at their boundaries and only surface here when a caller asks for
/// something the data cannot provide.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite error.
    #[error("SQLite error: {0}")]
    SQLite(#[from] rusqlite::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The contact store cannot be read.
    #[error("Permission denied for contact store {path}: {reason}")]
    PermissionDenied { path: PathBuf, reason: String },

    /// No contact with the given name.
    #[error("Contact not found: {0}")]
    NotFound(String),

    /// Navigation was requested for an address without coordinates.
    #[error("Address has no known coordinates: {0}")]
    UnresolvedAddress(String),

    /// Logging backend could not be started.
    #[error("Logging error: {0}")]
    Logging(String),
}
