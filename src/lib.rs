//! nav2contacts - navigate to the postal addresses of your contacts.
//!
//! This crate reads contact rows from a local SQLite store, groups them into
//! contacts with deduplicated addresses, geocodes those addresses in the
//! background and turns a picked address into a navigation request.
//! All operations are synchronous; geocoding runs on a worker thread.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use nav2contacts::{Config, ContactMap, ContactStore, Directory, HttpGeocoder};
//!
//! let config = Config::default();
//! let store = ContactStore::open(&config.database_path).expect("Failed to open store");
//! let directory = Directory::new(store);
//!
//! // Live search: at most six contacts, stale passes never win
//! for contact in directory.search("Pizza").iter() {
//!     println!("{} ({} addresses)", contact.name, contact.addresses.len());
//! }
//!
//! // Geocode one contact's addresses and pick the first
//! let geocoder = HttpGeocoder::new(&config.geocoder_url, config.geocoder_timeout())
//!     .expect("Invalid geocoder");
//! let contact = directory.contact("[FAKE] Pizza Delivery").expect("Unknown contact");
//! let mut map = ContactMap::open(contact, Arc::new(geocoder)).expect("Failed to start");
//! map.wait();
//! for row in map.rows(None) {
//!     println!("{}. {}", row.marker, row.title);
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod contact_types;
pub mod directory;
pub mod errors;
pub mod geo;
pub mod logging;
pub mod screens;
pub mod search;
pub mod store;

// Re-export public API
pub use aggregate::{ResultLimit, SEARCH_RESULT_LIMIT, aggregate};
pub use config::Config;
pub use contact_types::{Address, Contact, Coordinates, NavigationRequest, RawContactRow};
pub use directory::Directory;
pub use errors::Error;
pub use geo::{GeocodeBatch, Geocoder, HttpGeocoder, distance_km};
pub use logging::init_logging;
pub use screens::{ContactMap, Screen, ScreenStack};
pub use search::{SearchSession, Snapshot};
pub use store::ContactStore;
