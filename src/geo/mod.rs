//! Distance and geocoding helpers.
//!
//! This module provides:
//! - `distance`: haversine great-circle distance
//! - `geocode`: the `Geocoder` trait and its HTTP implementation
//! - `batch`: cancellable background geocoding of one contact's addresses

pub mod batch;
pub mod distance;
pub mod geocode;

pub use batch::{BatchStatus, CancelToken, GeocodeBatch};
pub use distance::{EARTH_RADIUS_KM, distance_km};
pub use geocode::{Geocoder, HttpGeocoder, geocode_all};
