//! Map screen for one contact's addresses.

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::contact_types::{Address, Contact, Coordinates};
use crate::errors::Error;
use crate::geo::distance::distance_between;
use crate::geo::{BatchStatus, CancelToken, GeocodeBatch, Geocoder};

/// One list row on the map screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRow {
    /// 1-based marker label shown on the map.
    pub marker: usize,
    pub title: String,
    pub coordinates: Option<Coordinates>,
    pub distance_km: Option<f64>,
}

/// State of the map screen for the selected contact.
///
/// Owns the geocoding batch for the contact's addresses; dropping the screen
/// cancels the batch.
pub struct ContactMap {
    contact: Contact,
    batch: Option<GeocodeBatch>,
    geocoded: bool,
}

impl fmt::Debug for ContactMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactMap")
            .field("contact", &self.contact.name)
            .field("addresses", &self.contact.addresses.len())
            .field("geocoded", &self.geocoded)
            .finish()
    }
}

impl ContactMap {
    /// Open the map for `contact` and start geocoding its addresses.
    pub fn open(contact: Contact, geocoder: Arc<dyn Geocoder>) -> Result<Self, Error> {
        let batch = GeocodeBatch::spawn(contact.addresses.clone(), geocoder)?;
        Ok(Self {
            contact,
            batch: Some(batch),
            geocoded: false,
        })
    }

    /// Map for a contact whose addresses already carry coordinates.
    pub fn resolved(contact: Contact) -> Self {
        Self {
            contact,
            batch: None,
            geocoded: true,
        }
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Cancellation token of the running batch, if geocoding is still in progress.
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.batch.as_ref().map(|b| b.token().clone())
    }

    pub fn is_loading(&self) -> bool {
        !self.geocoded
    }

    /// Pick up finished geocoding results. Returns true when the screen
    /// needs to be redrawn.
    pub fn refresh(&mut self) -> bool {
        let Some(batch) = self.batch.as_mut() else {
            return false;
        };
        match batch.poll() {
            BatchStatus::Pending => false,
            BatchStatus::Ready => {
                if let Some(addresses) = batch.addresses() {
                    self.contact.addresses = addresses.to_vec();
                }
                self.finish()
            }
            // Addresses stay listed without locations.
            BatchStatus::Failed | BatchStatus::Cancelled => self.finish(),
        }
    }

    /// Block until geocoding is done.
    pub fn wait(&mut self) {
        if let Some(batch) = self.batch.take() {
            if let Some(addresses) = batch.wait() {
                self.contact.addresses = addresses;
            }
            self.geocoded = true;
        }
    }

    fn finish(&mut self) -> bool {
        self.batch = None;
        self.geocoded = true;
        debug!(
            "event=contact_map status=geocoded contact={:?} located={}",
            self.contact.name,
            self.contact
                .addresses
                .iter()
                .filter(|a| a.coordinates().is_some())
                .count()
        );
        true
    }

    /// Rows to display. Empty while geocoding is in progress.
    pub fn rows(&self, current: Option<Coordinates>) -> Vec<MapRow> {
        if !self.geocoded {
            return Vec::new();
        }
        self.contact
            .addresses
            .iter()
            .enumerate()
            .map(|(i, address)| {
                let coordinates = address.coordinates();
                let distance_km = match (current, coordinates) {
                    (Some(from), Some(to)) => Some(distance_between(from, to)),
                    _ => None,
                };
                MapRow {
                    marker: i + 1,
                    title: address.label(),
                    coordinates,
                    distance_km,
                }
            })
            .collect()
    }

    /// Address behind the 1-based `marker`.
    pub fn address(&self, marker: usize) -> Option<&Address> {
        marker
            .checked_sub(1)
            .and_then(|i| self.contact.addresses.get(i))
    }
}
