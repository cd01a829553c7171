//! Persisted application state
//!
//! Remembers the last selected server between runs so the next invocation
//! can reconnect without asking again. Stored as JSON in the platform state
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ServerConfig;
use crate::error::{Result, StateError};

/// State carried across runs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppState {
    /// Server chosen in the last session, if any
    pub selected_server: Option<ServerConfig>,
}

/// On-disk location of the application state
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// State file at the platform default location
    ///
    /// # Returns
    /// * `Result<Self>` - State file handle or error when no state
    ///   directory can be determined
    pub fn default_location() -> Result<Self> {
        let base = dirs::state_dir()
            .or_else(dirs::data_dir)
            .ok_or(StateError::NoStateDirectory)?;
        Ok(Self {
            path: base.join("ftpsh").join("state.json"),
        })
    }

    /// State file at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this handle reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state, defaulting when the file does not exist yet
    ///
    /// # Returns
    /// * `Result<AppState>` - Stored state, or the default on first run
    pub fn load(&self) -> Result<AppState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no state file, using defaults");
            return Ok(AppState::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| StateError::ReadFailed(e.to_string()))?;
        let state = serde_json::from_str(&content)
            .map_err(|e| StateError::ReadFailed(e.to_string()))?;
        Ok(state)
    }

    /// Write the state, creating parent directories as needed
    pub fn save(&self, state: &AppState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StateError::WriteFailed(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(state)
            .map_err(|e| StateError::WriteFailed(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| StateError::WriteFailed(e.to_string()))?;
        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}
