//! Completers for reedline - provide completion suggestions

use reedline::{Completer, Span, Suggestion};

use super::completion::{PathCompletionEngine, RemoteDirSource};

/// Remote-path completer for reedline.
///
/// Thin adapter: the engine does the matching and placeholder signaling;
/// this type only maps candidates onto reedline's span-based replacement
/// model. Every invocation is synchronous and non-blocking regardless of
/// network latency, which is what lets reedline call it on demand.
pub struct RemotePathCompleter {
    /// Completion engine backed by the directory cache
    engine: PathCompletionEngine,
}

impl RemotePathCompleter {
    /// Create a new remote-path completer
    ///
    /// # Arguments
    /// * `source` - Authenticated handle to the remote session
    ///
    /// # Returns
    /// * `Self` - New completer
    pub fn new<S: RemoteDirSource>(source: S) -> Self {
        Self {
            engine: PathCompletionEngine::new(source),
        }
    }
}

impl Completer for RemotePathCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let typed = &line[..pos.min(line.len())];
        let candidates = self.engine.complete(typed);

        candidates
            .into_iter()
            .map(|candidate| Suggestion {
                value: candidate.text,
                description: None,
                style: None,
                extra: None,
                span: Span::new(pos.saturating_sub(candidate.replace_len), pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

/// Local filesystem path completer for reedline.
///
/// Counterpart of [`RemotePathCompleter`] for prompts that take local paths
/// (upload sources, download destinations). Local listing is cheap, so no
/// cache or placeholder machinery is involved.
pub struct LocalPathCompleter;

impl LocalPathCompleter {
    fn list_dir(dirname: &str) -> Vec<String> {
        let read_dir = if dirname.is_empty() {
            std::fs::read_dir(".")
        } else {
            std::fs::read_dir(dirname)
        };
        match read_dir {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Completer for LocalPathCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let typed = &line[..pos.min(line.len())];
        let (dirname, basename) = match typed.rfind('/') {
            Some(0) => ("/", &typed[1..]),
            Some(idx) => (&typed[..idx], &typed[idx + 1..]),
            None => ("", typed),
        };

        Self::list_dir(dirname)
            .into_iter()
            .filter(|name| name.starts_with(basename))
            .map(|name| Suggestion {
                value: name,
                description: None,
                style: None,
                extra: None,
                span: Span::new(pos.saturating_sub(basename.len()), pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, TransferError};
    use std::collections::HashMap;
    use std::time::{Duration, Instant};

    struct MapSource {
        dirs: HashMap<String, Vec<String>>,
        current: Option<String>,
    }

    impl MapSource {
        fn new(dirs: &[(&str, &[&str])]) -> Self {
            Self {
                dirs: dirs
                    .iter()
                    .map(|(d, ls)| {
                        (d.to_string(), ls.iter().map(|s| s.to_string()).collect())
                    })
                    .collect(),
                current: None,
            }
        }
    }

    impl RemoteDirSource for MapSource {
        fn change_directory(&mut self, path: &str) -> Result<()> {
            if self.dirs.contains_key(path) {
                self.current = Some(path.to_string());
                Ok(())
            } else {
                Err(TransferError::NoSuchRemotePath(path.to_string()).into())
            }
        }

        fn list_current_directory(&mut self) -> Result<Vec<String>> {
            let current = self
                .current
                .as_ref()
                .ok_or_else(|| TransferError::NoSuchRemotePath("<none>".to_string()))?;
            Ok(self.dirs[current].clone())
        }
    }

    fn complete_settled(
        completer: &mut RemotePathCompleter,
        line: &str,
        pos: usize,
    ) -> Vec<Suggestion> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let suggestions = completer.complete(line, pos);
            let placeholder_only =
                suggestions.len() == 1 && suggestions[0].value == "...";
            if !placeholder_only {
                return suggestions;
            }
            if Instant::now() > deadline {
                panic!("completion never settled");
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_span_covers_typed_segment() {
        let source = MapSource::new(&[("/home", &["user", "usr"])]);
        let mut completer = RemotePathCompleter::new(source);

        let suggestions = complete_settled(&mut completer, "/home/us", 8);
        assert_eq!(suggestions.len(), 2);
        for suggestion in &suggestions {
            assert_eq!(suggestion.span.start, 6); // Start of "us"
            assert_eq!(suggestion.span.end, 8); // Cursor position
        }
    }

    #[test]
    fn test_placeholder_span_is_empty() {
        let source = MapSource::new(&[("/home", &["user"])]);
        let mut completer = RemotePathCompleter::new(source);

        // First invocation: nothing cached, placeholder holds the cursor
        let suggestions = completer.complete("/home/u", 7);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "...");
        assert_eq!(suggestions[0].span.start, 7);
        assert_eq!(suggestions[0].span.end, 7);
    }

    #[test]
    fn test_local_completer_lists_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("alpha.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("beta.txt"), b"x").unwrap();

        let mut completer = LocalPathCompleter;
        let line = format!("{}/al", dir.path().display());
        let suggestions = completer.complete(&line, line.len());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "alpha.txt");
        assert_eq!(suggestions[0].span.end - suggestions[0].span.start, 2);
    }

    #[test]
    fn test_local_completer_missing_dir_is_empty() {
        let mut completer = LocalPathCompleter;
        let suggestions = completer.complete("/definitely/not/here/x", 22);
        assert!(suggestions.is_empty());
    }
}
