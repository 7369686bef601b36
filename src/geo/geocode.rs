//! Address geocoding.

use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;

use crate::contact_types::{Address, Coordinates};
use crate::errors::Error;

/// Resolves a postal address to coordinates.
///
/// Implementations return `None` for "no result" and for provider failures
/// alike; callers display the address without a location in both cases.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, street: &str, city: &str, country: &str) -> Option<Coordinates>;
}

/// Fill in coordinates for every address the geocoder can resolve.
///
/// Returns the number of addresses resolved.
pub fn geocode_all(geocoder: &dyn Geocoder, addresses: &mut [Address]) -> usize {
    let mut resolved = 0;
    for address in addresses.iter_mut() {
        if let Some(coords) = geocoder.geocode(&address.street, &address.city, &address.country) {
            address.set_coordinates(coords);
            resolved += 1;
        }
    }
    resolved
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Geocoder backed by a Nominatim-compatible HTTP search endpoint.
pub struct HttpGeocoder {
    agent: ureq::Agent,
    search_url: String,
}

impl HttpGeocoder {
    /// Create a geocoder for `base_url` (e.g. `https://nominatim.openstreetmap.org`).
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the URL is not http(s) or the timeout is zero.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Invalid geocoder URL: {base_url} (must start with http:// or https://)"
            )));
        }
        if timeout.is_zero() {
            return Err(Error::Config("Geocoder timeout must be positive".into()));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build();

        Ok(Self {
            agent,
            search_url: format!("{base}/search"),
        })
    }

    fn lookup(&self, query: &str) -> Result<Option<Coordinates>, String> {
        let places: Vec<Place> = self
            .agent
            .get(&self.search_url)
            .query("q", query)
            .query("format", "json")
            .query("limit", "1")
            .call()
            .map_err(|e| e.to_string())?
            .into_json()
            .map_err(|e| e.to_string())?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };
        parse_place(&place).map(Some)
    }
}

fn parse_place(place: &Place) -> Result<Coordinates, String> {
    let latitude = place
        .lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude {:?}: {e}", place.lat))?;
    let longitude = place
        .lon
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude {:?}: {e}", place.lon))?;
    Ok(Coordinates::new(latitude, longitude))
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, street: &str, city: &str, country: &str) -> Option<Coordinates> {
        let query = format!("{street}, {city}, {country}");
        match self.lookup(&query) {
            Ok(Some(coords)) => {
                debug!("event=geocode status=ok query={query:?}");
                Some(coords)
            }
            Ok(None) => {
                debug!("event=geocode status=empty query={query:?}");
                None
            }
            Err(e) => {
                warn!("event=geocode status=failed query={query:?} error={e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGeocoder;

    impl Geocoder for FixedGeocoder {
        fn geocode(&self, street: &str, _city: &str, _country: &str) -> Option<Coordinates> {
            (street != "nowhere").then(|| Coordinates::new(1.0, 2.0))
        }
    }

    #[test]
    fn test_geocode_all_fills_resolved_addresses() {
        let mut addresses = vec![
            Address::new("1 Main St", "Town", "US"),
            Address::new("nowhere", "Town", "US"),
        ];
        let resolved = geocode_all(&FixedGeocoder, &mut addresses);

        assert_eq!(resolved, 1);
        assert_eq!(addresses[0].coordinates(), Some(Coordinates::new(1.0, 2.0)));
        assert_eq!(addresses[1].coordinates(), None);
    }

    #[test]
    fn test_http_geocoder_rejects_bad_url() {
        let result = HttpGeocoder::new("ftp://example.com", Duration::from_secs(5));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_http_geocoder_rejects_zero_timeout() {
        let result = HttpGeocoder::new("https://example.com", Duration::ZERO);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_http_geocoder_search_url() {
        let geocoder = HttpGeocoder::new("https://example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(geocoder.search_url, "https://example.com/search");
    }

    #[test]
    fn test_unreachable_provider_yields_none() {
        // Port 9 (discard) on localhost is closed in test environments.
        let geocoder = HttpGeocoder::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        assert_eq!(geocoder.geocode("1 Main St", "Town", "US"), None);
    }

    #[test]
    fn test_parse_place() {
        let json = r#"[{"lat": "37.4220", "lon": "-122.0841", "display_name": "x"}]"#;
        let places: Vec<Place> = serde_json::from_str(json).unwrap();
        let coords = parse_place(&places[0]).unwrap();
        assert_eq!(coords, Coordinates::new(37.422, -122.0841));

        let bad = Place {
            lat: "north".into(),
            lon: "0".into(),
        };
        assert!(parse_place(&bad).is_err());
    }
}
