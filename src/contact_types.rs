//! Contact and address data types.

use std::fmt;

use serde::Serialize;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse `"lat,lon"` as accepted by the `--from` flag.
    pub fn parse(text: &str) -> Option<Self> {
        let (lat, lon) = text.split_once(',')?;
        let latitude: f64 = lat.trim().parse().ok()?;
        let longitude: f64 = lon.trim().parse().ok()?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self::new(latitude, longitude))
    }
}

/// A postal address belonging to a contact.
///
/// `PartialEq` compares every field, coordinates included. Deduplication
/// inside a contact goes through [`Address::same_place`] instead, which
/// ignores coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            country: country.into(),
            latitude: None,
            longitude: None,
        }
    }

    /// True when both addresses name the same street, city and country.
    pub fn same_place(&self, other: &Address) -> bool {
        self.street == other.street && self.city == other.city && self.country == other.country
    }

    /// Coordinates, if geocoding resolved both of them.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    pub fn set_coordinates(&mut self, coords: Coordinates) {
        self.latitude = Some(coords.latitude);
        self.longitude = Some(coords.longitude);
    }

    /// Query string handed to the geocoder.
    pub fn geocode_query(&self) -> String {
        format!("{}, {}, {}", self.street, self.city, self.country)
    }

    /// Short label used as a list row title.
    pub fn label(&self) -> String {
        format!("{}, {}", self.street, self.city)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.street, self.city, self.country)
    }
}

/// A contact with its deduplicated postal addresses.
///
/// Two contacts are equal when their names are equal.
#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub name: String,
    pub starred: bool,
    pub addresses: Vec<Address>,
}

impl Contact {
    pub fn new(name: impl Into<String>, starred: bool) -> Self {
        Self {
            name: name.into(),
            starred,
            addresses: Vec::new(),
        }
    }

    pub fn with_addresses(mut self, addresses: impl IntoIterator<Item = Address>) -> Self {
        for address in addresses {
            self.add_address(address);
        }
        self
    }

    /// Append `address` unless an address for the same place is already present.
    ///
    /// Returns whether the address was added.
    pub fn add_address(&mut self, address: Address) -> bool {
        if self.addresses.iter().any(|a| a.same_place(&address)) {
            return false;
        }
        self.addresses.push(address);
        true
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Contact {}

/// One postal-address row as returned by the contact store.
///
/// String columns that are NULL in the store arrive here as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContactRow {
    pub id: i64,
    pub name: String,
    pub starred: bool,
    pub street: String,
    pub city: String,
    pub country: String,
}

impl RawContactRow {
    pub fn new(
        name: impl Into<String>,
        starred: bool,
        street: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            starred,
            street: street.into(),
            city: city.into(),
            country: country.into(),
        }
    }

    pub(crate) fn address(&self) -> Address {
        Address::new(self.street.clone(), self.city.clone(), self.country.clone())
    }
}

/// Request handed to the navigation host when the driver confirms a destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavigationRequest {
    pub destination: Coordinates,
}

impl NavigationRequest {
    /// Build a request for `address`; fails when the address was never geocoded.
    pub fn for_address(address: &Address) -> Result<Self, crate::errors::Error> {
        address
            .coordinates()
            .map(|destination| Self { destination })
            .ok_or_else(|| crate::errors::Error::UnresolvedAddress(address.to_string()))
    }

    /// `geo:` URI understood by navigation apps.
    pub fn uri(&self) -> String {
        format!(
            "geo:{},{}",
            self.destination.latitude, self.destination.longitude
        )
    }
}
