//! Background fetch scheduling for remote directory listings.
//!
//! One worker thread owns the [`RemoteDirSource`] and serves fetch requests
//! from a channel, one at a time; the foreground never touches the network.
//! Outcomes land in a slot map shared with the foreground, which drains them
//! via [`FetchScheduler::poll`].

use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::{debug, warn};

use super::RemoteDirSource;
use crate::error::FtpshError;

/// Per-directory fetch slot.
///
/// A path has at most one slot at any instant: either a fetch is in flight,
/// or a completed outcome is waiting to be consumed by exactly one poll.
enum FetchSlot {
    InFlight,
    Done(Result<Vec<String>, FtpshError>),
}

/// Outcome of polling a directory's fetch slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPoll {
    /// No fetch history and nothing in flight.
    Idle,

    /// A fetch is in flight; no result yet.
    Pending,

    /// The fetch succeeded; the outcome is now consumed.
    Ready(Vec<String>),

    /// The fetch failed; the outcome is now consumed.
    Failed,
}

/// Serializes and deduplicates remote directory fetches behind one worker.
///
/// The underlying connection cannot serve concurrent requests, so requests
/// for different directories queue behind each other; repeated requests for
/// the same directory while one is in flight are dropped.
pub struct FetchScheduler {
    slots: Arc<Mutex<HashMap<String, FetchSlot>>>,
    tx: Sender<String>,
}

impl FetchScheduler {
    /// Spawn the worker thread and hand it the directory source.
    ///
    /// The worker exits when the scheduler is dropped (the request channel
    /// closes); an in-flight fetch is allowed to finish first.
    pub fn new<S: RemoteDirSource>(mut source: S) -> Self {
        let slots: Arc<Mutex<HashMap<String, FetchSlot>>> = Arc::new(Mutex::new(HashMap::new()));
        let (tx, rx) = mpsc::channel::<String>();

        let worker_slots = Arc::clone(&slots);
        thread::spawn(move || {
            for path in rx {
                debug!(path = %path, "fetching remote listing");
                let outcome = source.fetch_listing(&path);
                if let Err(ref e) = outcome {
                    warn!(path = %path, error = %e, "remote listing failed");
                }
                let mut slots = worker_slots.lock().unwrap();
                slots.insert(path, FetchSlot::Done(outcome));
            }
        });

        Self { slots, tx }
    }

    /// Request a background fetch for `path`.
    ///
    /// Returns immediately. No new fetch is started while one is in flight
    /// for the same path or while a completed outcome is still unconsumed.
    pub fn request(&self, path: &str) {
        let mut slots = self.slots.lock().unwrap();
        if slots.contains_key(path) {
            return;
        }
        slots.insert(path.to_string(), FetchSlot::InFlight);
        if self.tx.send(path.to_string()).is_err() {
            // Worker is gone; surface as a failed fetch instead of hanging
            // the slot in a pending state forever.
            slots.insert(
                path.to_string(),
                FetchSlot::Done(Err(FtpshError::Generic(
                    "listing worker has shut down".to_string(),
                ))),
            );
        }
    }

    /// Poll the fetch slot for `path`.
    ///
    /// `Ready` and `Failed` consume the outcome: the slot is cleared and a
    /// subsequent poll without a new request reports `Idle`.
    pub fn poll(&self, path: &str) -> FetchPoll {
        let mut slots = self.slots.lock().unwrap();
        match slots.remove(path) {
            None => FetchPoll::Idle,
            Some(FetchSlot::InFlight) => {
                slots.insert(path.to_string(), FetchSlot::InFlight);
                FetchPoll::Pending
            }
            Some(FetchSlot::Done(Ok(listing))) => FetchPoll::Ready(listing),
            Some(FetchSlot::Done(Err(_))) => FetchPoll::Failed,
        }
    }

    /// Whether a fetch for `path` is currently in flight.
    ///
    /// Peeks without consuming; a waiting completed outcome is not "pending".
    pub fn is_pending(&self, path: &str) -> bool {
        let slots = self.slots.lock().unwrap();
        matches!(slots.get(path), Some(FetchSlot::InFlight))
    }
}
