//! Remote-path completion for the interactive prompts.
//!
//! The FTP control connection is strictly synchronous: one request at a time,
//! and a directory listing is a full blocking round trip. The prompt's
//! completion callback, on the other hand, runs on the foreground thread and
//! must return immediately on every keystroke. This module reconciles the two
//! with a per-directory cache and a single background fetch worker:
//!
//! - **[`FetchScheduler`]**: one worker thread, at most one in-flight fetch
//!   per directory, results handed back through a polled slot map
//! - **[`ListingCache`]**: last-known listing per directory, stale entries
//!   served while a refresh runs, evicted on fetch failure
//! - **[`PathCompletionEngine`]**: splits the typed path, matches the prefix
//!   against whatever listing is available, and signals "fetch pending" with
//!   a placeholder candidate so the cursor stays put
//!
//! The prompt re-invokes the engine on every completion request, which is how
//! a pending fetch eventually resolves into real candidates: polling is
//! keystroke-driven, not timer-driven.

mod cache;
mod engine;
mod scheduler;

pub use cache::{DirListing, ListingCache};
pub use engine::{PathCandidate, PathCompletionEngine, COMPLETION_PLACEHOLDER};
pub use scheduler::{FetchPoll, FetchScheduler};

use crate::error::Result;

/// A blocking source of remote directory listings.
///
/// Implemented by the FTP session; the completion core only ever drives it
/// from its single background worker thread. The two-step protocol mirrors
/// the control connection: change into the directory, then list it.
pub trait RemoteDirSource: Send + 'static {
    /// Change the remote working directory.
    fn change_directory(&mut self, path: &str) -> Result<()>;

    /// List entry names in the current remote directory.
    fn list_current_directory(&mut self) -> Result<Vec<String>>;

    /// Change into `path` and list it as one fetch.
    ///
    /// A failure of either step is a single fetch failure. Shared-handle
    /// implementations override this to hold their lock across both steps.
    fn fetch_listing(&mut self, path: &str) -> Result<Vec<String>> {
        self.change_directory(path)?;
        self.list_current_directory()
    }
}
