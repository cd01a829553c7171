//! Per-directory listing cache with stale-while-revalidate semantics.
//!
//! The cache answers "what do we know about this directory right now" without
//! ever touching the network on the calling path. A listing is replaced
//! wholesale by the next successful fetch, never merged; a failed fetch
//! evicts the entry so the next lookup retries instead of trusting a
//! poisoned empty result.

use std::collections::HashMap;

use tracing::debug;

use super::scheduler::{FetchPoll, FetchScheduler};
use super::RemoteDirSource;

/// What the cache knows about one directory at lookup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    /// False while a fetch for this directory is in flight (the entries are
    /// the last known listing, possibly empty if none has ever completed).
    pub fresh: bool,

    /// Entry names, in the order the server returned them.
    pub entries: Vec<String>,
}

impl DirListing {
    fn stale_empty() -> Self {
        Self {
            fresh: false,
            entries: Vec::new(),
        }
    }
}

/// Cache of last-known directory listings, backed by a [`FetchScheduler`].
///
/// Entries live until the process exits or [`refresh`](Self::refresh) is
/// called; a single interactive session is expected to reflect a single
/// remote session's state, so there is no TTL.
pub struct ListingCache {
    entries: HashMap<String, Vec<String>>,
    scheduler: FetchScheduler,
}

impl ListingCache {
    /// Create a cache that fetches through the given directory source.
    pub fn new<S: RemoteDirSource>(source: S) -> Self {
        Self {
            entries: HashMap::new(),
            scheduler: FetchScheduler::new(source),
        }
    }

    /// Look up the current knowledge about `path`, never blocking.
    ///
    /// Drains the scheduler first: a completed fetch replaces the entry, a
    /// failed fetch evicts it (the retry happens on the next lookup). A
    /// lookup of a never-seen directory triggers a background fetch and
    /// returns an empty, non-fresh listing in the meantime.
    pub fn lookup(&mut self, path: &str) -> DirListing {
        match self.scheduler.poll(path) {
            FetchPoll::Ready(listing) => {
                debug!(path = %path, entries = listing.len(), "listing cached");
                self.entries.insert(path.to_string(), listing);
            }
            FetchPoll::Failed => {
                self.entries.remove(path);
                return DirListing::stale_empty();
            }
            FetchPoll::Pending | FetchPoll::Idle => {}
        }

        let pending = self.scheduler.is_pending(path);
        match self.entries.get(path) {
            Some(entries) => DirListing {
                fresh: !pending,
                entries: entries.clone(),
            },
            None => {
                if !pending {
                    self.scheduler.request(path);
                }
                DirListing::stale_empty()
            }
        }
    }

    /// Re-fetch `path` in the background while the old listing keeps being
    /// served (explicit invalidation; nothing else ever re-fetches a
    /// directory that has been listed successfully).
    pub fn refresh(&self, path: &str) {
        self.scheduler.request(path);
    }

    /// Whether a successful listing for `path` is currently cached.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, TransferError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    /// Directory source whose fetches block until the test releases them
    /// through a gate channel.
    struct GatedSource {
        dirs: HashMap<String, Vec<String>>,
        gate: Option<Receiver<()>>,
        fetches: Arc<AtomicUsize>,
        current: Option<String>,
    }

    impl GatedSource {
        fn new(dirs: &[(&str, &[&str])]) -> (Self, Arc<AtomicUsize>) {
            let fetches = Arc::new(AtomicUsize::new(0));
            let source = Self {
                dirs: dirs
                    .iter()
                    .map(|(d, ls)| {
                        (d.to_string(), ls.iter().map(|s| s.to_string()).collect())
                    })
                    .collect(),
                gate: None,
                fetches: Arc::clone(&fetches),
                current: None,
            };
            (source, fetches)
        }

        fn gated(mut self) -> (Self, Sender<()>) {
            let (tx, rx) = mpsc::channel();
            self.gate = Some(rx);
            (self, tx)
        }
    }

    impl RemoteDirSource for GatedSource {
        fn change_directory(&mut self, path: &str) -> Result<()> {
            // Counts fetch attempts: every fetch starts with a cd, including
            // ones that fail before the listing step.
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.dirs.contains_key(path) {
                self.current = Some(path.to_string());
                Ok(())
            } else {
                Err(TransferError::NoSuchRemotePath(path.to_string()).into())
            }
        }

        fn list_current_directory(&mut self) -> Result<Vec<String>> {
            if let Some(gate) = &self.gate {
                // Blocks until the test sends a release token
                let _ = gate.recv();
            }
            let current = self
                .current
                .as_ref()
                .ok_or_else(|| TransferError::NoSuchRemotePath("<none>".to_string()))?;
            Ok(self.dirs[current].clone())
        }
    }

    /// Keystroke-driven polling: look up until the listing is fresh.
    fn lookup_settled(cache: &mut ListingCache, path: &str) -> DirListing {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let listing = cache.lookup(path);
            if listing.fresh {
                return listing;
            }
            if Instant::now() > deadline {
                panic!("listing for {path} never became fresh");
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_miss_triggers_fetch_and_returns_empty() {
        let (source, fetches) = GatedSource::new(&[("/pub", &["a.txt"])]);
        let mut cache = ListingCache::new(source);

        let listing = cache.lookup("/pub");
        assert!(!listing.fresh);
        assert!(listing.entries.is_empty());

        let settled = lookup_settled(&mut cache, "/pub");
        assert_eq!(settled.entries, vec!["a.txt".to_string()]);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_visited_directory_is_not_refetched() {
        let (source, fetches) = GatedSource::new(&[("/pub", &["a.txt"])]);
        let mut cache = ListingCache::new(source);

        lookup_settled(&mut cache, "/pub");
        for _ in 0..10 {
            let listing = cache.lookup("/pub");
            assert!(listing.fresh);
        }
        thread::sleep(Duration::from_millis(50));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_evicts_and_next_lookup_retries() {
        let (source, fetches) = GatedSource::new(&[("/pub", &["a.txt"])]);
        let mut cache = ListingCache::new(source);

        // First lookup triggers a fetch that will fail
        cache.lookup("/missing");
        let deadline = Instant::now() + Duration::from_secs(2);
        // Wait until the failure has been consumed and the entry evicted
        loop {
            let listing = cache.lookup("/missing");
            assert!(listing.entries.is_empty());
            if !cache.contains("/missing") && fetches.load(Ordering::SeqCst) >= 1 {
                break;
            }
            if Instant::now() > deadline {
                panic!("failed fetch never resolved");
            }
            thread::sleep(Duration::from_millis(5));
        }

        // The next lookup re-triggers a fetch rather than serving a
        // permanently-empty cached result
        let before = fetches.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        cache.lookup("/missing");
        thread::sleep(Duration::from_millis(50));
        assert!(fetches.load(Ordering::SeqCst) > before);
    }

    #[test]
    fn test_stale_listing_served_while_refresh_in_flight() {
        let (source, _) = GatedSource::new(&[("/pub", &["a.txt", "b.txt"])]);
        let (source, gate) = source.gated();
        let mut cache = ListingCache::new(source);

        // Populate the entry (release the first fetch)
        cache.lookup("/pub");
        gate.send(()).unwrap();
        let settled = lookup_settled(&mut cache, "/pub");
        assert_eq!(settled.entries.len(), 2);

        // Kick off a refresh that stays blocked on the gate
        cache.refresh("/pub");
        thread::sleep(Duration::from_millis(20));

        // The old listing is served, marked stale, never empty
        let stale = cache.lookup("/pub");
        assert!(!stale.fresh);
        assert_eq!(stale.entries.len(), 2);

        gate.send(()).unwrap();
        let refreshed = lookup_settled(&mut cache, "/pub");
        assert!(refreshed.fresh);
    }

    #[test]
    fn test_lookup_is_nonblocking_under_latency() {
        let (source, _) = GatedSource::new(&[("/slow", &["x"])]);
        let (source, _gate) = source.gated(); // never released
        let mut cache = ListingCache::new(source);

        for _ in 0..20 {
            let start = Instant::now();
            let listing = cache.lookup("/slow");
            assert!(!listing.fresh);
            assert!(start.elapsed() < Duration::from_millis(50));
        }
    }
}
