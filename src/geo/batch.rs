//! Cancellable background geocoding of a contact's addresses.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::debug;

use super::geocode::Geocoder;
use crate::contact_types::Address;
use crate::errors::Error;

/// Shared cancellation flag for one batch.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Progress of a geocoding batch as seen by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Pending,
    Ready,
    Cancelled,
    /// The worker stopped without delivering (it panicked).
    Failed,
}

type Notify = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a geocoding batch running on a background thread.
///
/// Results are only ever observed through this handle. Once the batch is
/// cancelled, explicitly or by dropping the handle, its results are discarded
/// even if the worker already finished. A lookup in flight when the batch is
/// cancelled still runs to completion; the worker stops before the next one.
pub struct GeocodeBatch {
    token: CancelToken,
    receiver: Receiver<Vec<Address>>,
    outcome: Option<Vec<Address>>,
    failed: bool,
}

impl GeocodeBatch {
    /// Start geocoding `addresses` in the background.
    pub fn spawn(addresses: Vec<Address>, geocoder: Arc<dyn Geocoder>) -> Result<Self, Error> {
        Self::spawn_inner(addresses, geocoder, None)
    }

    /// Like [`GeocodeBatch::spawn`], calling `notify` from the worker once
    /// results are available. `notify` is not called for a cancelled batch.
    pub fn spawn_with_notify<F>(
        addresses: Vec<Address>,
        geocoder: Arc<dyn Geocoder>,
        notify: F,
    ) -> Result<Self, Error>
    where
        F: FnOnce() + Send + 'static,
    {
        Self::spawn_inner(addresses, geocoder, Some(Box::new(notify)))
    }

    fn spawn_inner(
        mut addresses: Vec<Address>,
        geocoder: Arc<dyn Geocoder>,
        notify: Option<Notify>,
    ) -> Result<Self, Error> {
        let token = CancelToken::new();
        let worker_token = token.clone();
        let (sender, receiver) = mpsc::channel();

        thread::Builder::new()
            .name("geocode-batch".into())
            .spawn(move || {
                for address in addresses.iter_mut() {
                    if worker_token.is_cancelled() {
                        debug!("event=geocode_batch status=cancelled");
                        return;
                    }
                    if let Some(coords) =
                        geocoder.geocode(&address.street, &address.city, &address.country)
                    {
                        address.set_coordinates(coords);
                    }
                }
                if worker_token.is_cancelled() {
                    debug!("event=geocode_batch status=cancelled");
                    return;
                }
                let resolved = addresses.iter().filter(|a| a.coordinates().is_some()).count();
                debug!(
                    "event=geocode_batch status=done addresses={} resolved={resolved}",
                    addresses.len()
                );
                // The handle may already be gone; nothing to deliver to then.
                if sender.send(addresses).is_ok() {
                    if let Some(notify) = notify {
                        if !worker_token.is_cancelled() {
                            notify();
                        }
                    }
                }
            })?;

        Ok(Self {
            token,
            receiver,
            outcome: None,
            failed: false,
        })
    }

    /// Token shared with the worker.
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Abandon the batch; its results will never be delivered.
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.outcome = None;
    }

    /// Check for results without blocking.
    pub fn poll(&mut self) -> BatchStatus {
        if self.token.is_cancelled() {
            self.outcome = None;
            return BatchStatus::Cancelled;
        }
        if self.outcome.is_some() {
            return BatchStatus::Ready;
        }
        if self.failed {
            return BatchStatus::Failed;
        }
        match self.receiver.try_recv() {
            Ok(addresses) => {
                self.outcome = Some(addresses);
                BatchStatus::Ready
            }
            Err(TryRecvError::Empty) => BatchStatus::Pending,
            Err(TryRecvError::Disconnected) => {
                self.failed = true;
                BatchStatus::Failed
            }
        }
    }

    /// Geocoded addresses, once [`GeocodeBatch::poll`] has reported `Ready`.
    pub fn addresses(&self) -> Option<&[Address]> {
        if self.token.is_cancelled() {
            return None;
        }
        self.outcome.as_deref()
    }

    /// Block until the batch finishes. `None` if it was cancelled or failed.
    pub fn wait(mut self) -> Option<Vec<Address>> {
        if self.token.is_cancelled() {
            return None;
        }
        if let Some(outcome) = self.outcome.take() {
            return Some(outcome);
        }
        let addresses = self.receiver.recv().ok()?;
        if self.token.is_cancelled() {
            return None;
        }
        Some(addresses)
    }
}

impl Drop for GeocodeBatch {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact_types::Coordinates;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};

    struct CountingGeocoder {
        calls: AtomicUsize,
    }

    impl Geocoder for CountingGeocoder {
        fn geocode(&self, street: &str, _city: &str, _country: &str) -> Option<Coordinates> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            (street != "unknown").then(|| Coordinates::new(n as f64, 0.0))
        }
    }

    /// Blocks every lookup until the test opens the gate.
    struct GatedGeocoder {
        gate: Mutex<Receiver<()>>,
        calls: AtomicUsize,
    }

    impl Geocoder for GatedGeocoder {
        fn geocode(&self, _street: &str, _city: &str, _country: &str) -> Option<Coordinates> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.gate.lock().unwrap();
            gate.recv().ok()?;
            Some(Coordinates::new(1.0, 1.0))
        }
    }

    fn addresses(streets: &[&str]) -> Vec<Address> {
        streets
            .iter()
            .map(|s| Address::new(*s, "Town", "US"))
            .collect()
    }

    fn poll_until_settled(batch: &mut GeocodeBatch) -> BatchStatus {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let status = batch.poll();
            if status != BatchStatus::Pending || Instant::now() > deadline {
                return status;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_batch_geocodes_every_address() {
        let geocoder = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });
        let batch = GeocodeBatch::spawn(addresses(&["1 A St", "unknown", "3 C St"]), geocoder.clone())
            .unwrap();

        let result = batch.wait().unwrap();
        assert_eq!(result.len(), 3);
        assert!(result[0].coordinates().is_some());
        assert!(result[1].coordinates().is_none());
        assert!(result[2].coordinates().is_some());
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_poll_reports_ready_then_keeps_result() {
        let geocoder = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });
        let mut batch = GeocodeBatch::spawn(addresses(&["1 A St"]), geocoder).unwrap();

        assert_eq!(poll_until_settled(&mut batch), BatchStatus::Ready);
        assert_eq!(batch.poll(), BatchStatus::Ready);
        assert_eq!(batch.addresses().unwrap().len(), 1);
    }

    #[test]
    fn test_cancelled_batch_never_delivers() {
        let (open, gate) = mpsc::channel();
        let geocoder = Arc::new(GatedGeocoder {
            gate: Mutex::new(gate),
            calls: AtomicUsize::new(0),
        });
        let mut batch =
            GeocodeBatch::spawn(addresses(&["1 A St", "2 B St", "3 C St"]), geocoder.clone())
                .unwrap();

        batch.cancel();
        // Let any in-flight lookup finish.
        for _ in 0..3 {
            let _ = open.send(());
        }

        assert_eq!(batch.poll(), BatchStatus::Cancelled);
        assert!(batch.addresses().is_none());
        assert!(batch.wait().is_none());
        assert!(geocoder.calls.load(Ordering::SeqCst) <= 1);
    }

    #[test]
    fn test_drop_cancels_worker() {
        let (open, gate) = mpsc::channel();
        let geocoder = Arc::new(GatedGeocoder {
            gate: Mutex::new(gate),
            calls: AtomicUsize::new(0),
        });
        let batch =
            GeocodeBatch::spawn(addresses(&["1 A St", "2 B St"]), geocoder.clone()).unwrap();
        let token = batch.token().clone();

        drop(batch);
        assert!(token.is_cancelled());
        let _ = open.send(());
        let _ = open.send(());
    }

    #[test]
    fn test_notify_called_on_completion() {
        let geocoder = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });
        let (tx, rx) = mpsc::channel();
        let mut batch = GeocodeBatch::spawn_with_notify(addresses(&["1 A St"]), geocoder, move || {
            let _ = tx.send(());
        })
        .unwrap();

        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(batch.poll(), BatchStatus::Ready);
    }

    #[test]
    fn test_empty_batch_is_ready() {
        let geocoder = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });
        let batch = GeocodeBatch::spawn(Vec::new(), geocoder).unwrap();
        assert_eq!(batch.wait().unwrap().len(), 0);
    }
}
