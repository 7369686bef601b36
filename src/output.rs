//! JSON response types and formatting for CLI output.

use serde::Serialize;

use nav2contacts::contact_types::{Address, Contact};
use nav2contacts::screens::MapRow;

/// One contact in a list response.
#[derive(Serialize)]
pub struct ContactItem {
    pub name: String,
    pub starred: bool,
    pub addresses: Vec<AddressItem>,
}

/// One address in a list response.
#[derive(Serialize)]
pub struct AddressItem {
    pub street: String,
    pub city: String,
    pub country: String,
}

impl From<&Address> for AddressItem {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street.clone(),
            city: address.city.clone(),
            country: address.country.clone(),
        }
    }
}

impl From<&Contact> for ContactItem {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            starred: contact.starred,
            addresses: contact.addresses.iter().map(AddressItem::from).collect(),
        }
    }
}

/// Response for the read view.
#[derive(Serialize)]
pub struct ReadResponse {
    pub starred_only: bool,
    pub contacts: Vec<ContactItem>,
}

/// Response for a search pass.
#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub contacts: Vec<ContactItem>,
}

/// Response for the map view of one contact.
#[derive(Serialize)]
pub struct ShowResponse {
    pub name: String,
    pub starred: bool,
    pub rows: Vec<MapRow>,
}

/// Response for a navigation request.
#[derive(Serialize)]
pub struct NavigateResponse {
    pub name: String,
    pub address: String,
    pub uri: String,
}

/// Response for reading or changing settings.
#[derive(Serialize)]
pub struct SettingsResponse {
    pub starred_only: bool,
}

/// Response for seeding demo contacts.
#[derive(Serialize)]
pub struct SeedResponse {
    pub status: String,
    pub rows: usize,
}

/// Response for errors.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a contact list as plain text.
pub fn print_contacts(contacts: &[Contact]) {
    for contact in contacts {
        let star = if contact.starred { "*" } else { " " };
        let count = contact.addresses.len();
        let noun = if count == 1 { "address" } else { "addresses" };
        println!("{star} {} ({count} {noun})", contact.name);
        for address in &contact.addresses {
            println!("    {address}");
        }
    }
}

/// Format a distance the way the map list shows it.
pub fn format_distance(km: f64) -> String {
    if km < 10.0 {
        format!("{km:.1} km")
    } else {
        format!("{km:.0} km")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav2contacts::contact_types::Coordinates;

    #[test]
    fn test_serialize_read_response() {
        let contact =
            Contact::new("Acme", true).with_addresses([Address::new("1 Main St", "Town", "US")]);
        let response = ReadResponse {
            starred_only: false,
            contacts: vec![ContactItem::from(&contact)],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"name\":\"Acme\""));
        assert!(json.contains("\"starred\":true"));
        assert!(json.contains("\"street\":\"1 Main St\""));
    }

    #[test]
    fn test_serialize_show_response() {
        let response = ShowResponse {
            name: "Acme".to_string(),
            starred: false,
            rows: vec![MapRow {
                marker: 1,
                title: "1 Main St, Town".to_string(),
                coordinates: Some(Coordinates::new(1.5, 2.5)),
                distance_km: None,
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"marker\":1"));
        assert!(json.contains("\"latitude\":1.5"));
        assert!(json.contains("\"distance_km\":null"));
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0), "0.0 km");
        assert_eq!(format_distance(3.456), "3.5 km");
        assert_eq!(format_distance(111.19), "111 km");
    }
}
