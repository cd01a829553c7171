//! Turns typed path text into candidate completions.
//!
//! The engine's only data source is the [`ListingCache`]; it never blocks.
//! When nothing is known about the target directory yet it answers with a
//! single placeholder candidate, which holds the user's cursor steady while
//! the background fetch runs. The prompt re-invokes the engine on the next
//! completion request, by which time the listing may have arrived.

use super::cache::ListingCache;
use super::RemoteDirSource;

/// Reserved token signaling "fetch pending" to the prompt.
///
/// Never a valid remote entry name by convention; stripped from the typed
/// text before prefix matching.
pub const COMPLETION_PLACEHOLDER: &str = "...";

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCandidate {
    /// Replacement text (a full entry name, or the placeholder).
    pub text: String,

    /// How many trailing characters of the typed text this overwrites:
    /// the length of the last path segment as typed.
    pub replace_len: usize,
}

/// Remote-path completion engine.
pub struct PathCompletionEngine {
    cache: ListingCache,
}

impl PathCompletionEngine {
    /// Create an engine fetching through the given directory source.
    pub fn new<S: RemoteDirSource>(source: S) -> Self {
        Self {
            cache: ListingCache::new(source),
        }
    }

    /// Compute candidates for the typed path text.
    ///
    /// # Arguments
    /// * `typed` - Everything the user has typed up to the cursor
    ///
    /// # Returns
    /// * `Vec<PathCandidate>` - Candidates in the listing's own order
    pub fn complete(&mut self, typed: &str) -> Vec<PathCandidate> {
        let (dirname, basename) = split_path(typed);
        let prefix = strip_placeholder(basename);

        let listing = self.cache.lookup(dirname);
        if listing.entries.is_empty() {
            if has_placeholder(typed) {
                // The placeholder is already on screen; re-inserting it on
                // top of itself would stack markers on every keystroke.
                return Vec::new();
            }
            return vec![PathCandidate {
                text: COMPLETION_PLACEHOLDER.to_string(),
                replace_len: 0,
            }];
        }

        let replace_len = basename.len();
        listing
            .entries
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .map(|entry| PathCandidate {
                text: entry.clone(),
                replace_len,
            })
            .collect()
    }

    /// Re-fetch a directory in the background (old listing keeps serving).
    pub fn refresh(&self, path: &str) {
        self.cache.refresh(path);
    }
}

/// Split a typed path into directory and final segment at the last `/`.
///
/// Mirrors `os.path`-style splitting: `"/home/us"` → `("/home", "us")`,
/// `"/x"` → `("/", "x")`, `"file"` → `("", "file")`. Degenerate input (empty
/// string) yields two empty pieces, never an error.
fn split_path(typed: &str) -> (&str, &str) {
    match typed.rfind('/') {
        Some(0) => ("/", &typed[1..]),
        Some(idx) => (&typed[..idx], &typed[idx + 1..]),
        None => ("", typed),
    }
}

/// Strip one trailing placeholder marker, if present.
fn strip_placeholder(basename: &str) -> &str {
    basename
        .strip_suffix(COMPLETION_PLACEHOLDER)
        .unwrap_or(basename)
}

fn has_placeholder(typed: &str) -> bool {
    typed.ends_with(COMPLETION_PLACEHOLDER)
}
