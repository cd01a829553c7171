//! Configuration management for ftpsh
//!
//! This module handles loading, parsing, and managing configuration:
//! - The ftpsh TOML config file (server list, history, logging)
//! - FileZilla XML site exports (import path for existing setups)
//! - The password-decoding strategy used by both formats
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

pub mod filezilla;
pub mod password;

pub use filezilla::parse_filezilla_file;
pub use password::PasswordDecoder;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Known FTP servers
    #[serde(rename = "server", default)]
    pub servers: Vec<ServerConfig>,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A single FTP server entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Display name for this server
    pub name: String,

    /// Hostname or IP address
    pub host: String,

    /// Control-connection port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login username
    pub user: String,

    /// Login password (already decoded)
    #[serde(default)]
    pub password: String,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Map to the tracing crate's level type.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Where server definitions come from.
///
/// ftpsh understands its own TOML config as well as FileZilla's XML site
/// export; the variant selects the parser.
#[derive(Debug, Clone)]
pub enum ServerSource {
    /// `[[server]]` entries in a ftpsh TOML config file
    Toml(PathBuf),

    /// A FileZilla `sitemanager.xml` / exported XML file
    FileZilla(PathBuf),
}

impl ServerSource {
    /// Parse the server list from this source.
    pub fn load(&self) -> Result<Vec<ServerConfig>> {
        match self {
            ServerSource::Toml(path) => Ok(Config::from_file(path)?.servers),
            ServerSource::FileZilla(path) => parse_filezilla_file(path),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    21
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ftpsh_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|_| {
            ConfigError::FileNotFound(path.display().to_string())
        })?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when no file exists
    ///
    /// # Arguments
    /// * `path` - Explicit config path, or `None` to use the default location
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ftpsh")
            .join("config.toml")
    }

    /// Validate configuration values
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error describing the first bad field
    pub fn validate(&self) -> Result<()> {
        for server in &self.servers {
            if server.name.is_empty() {
                return Err(ConfigError::MissingField("server.name".to_string()).into());
            }
            if server.host.is_empty() {
                return Err(ConfigError::MissingField("server.host".to_string()).into());
            }
        }
        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl ServerConfig {
    /// Label shown in the server selection menu.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[server]]
        name = "mirror"
        host = "ftp.example.org"
        port = 2121
        user = "anonymous"
        password = "guest"

        [[server]]
        name = "backup"
        host = "backup.example.org"
        user = "ops"

        [history]
        max_size = 50
        persist = false

        [logging]
        level = "debug"
    "#;

    #[test]
    fn test_parse_servers() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.servers.len(), 2);
        assert_eq!(config.servers[0].name, "mirror");
        assert_eq!(config.servers[0].port, 2121);
        // Port falls back to the FTP default when omitted
        assert_eq!(config.servers[1].port, 21);
        assert_eq!(config.servers[1].password, "");
    }

    #[test]
    fn test_parse_sections() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.history.max_size, 50);
        assert!(!config.history.persist);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.logging.timestamps);
    }

    #[test]
    fn test_defaults_when_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.servers.is_empty());
        assert_eq!(config.history.max_size, 1000);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let config: Config = toml::from_str(
            r#"
            [[server]]
            name = "bad"
            host = ""
            user = "x"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_history() {
        let config: Config = toml::from_str("[history]\nmax_size = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_missing_default_is_ok() {
        // No explicit path and no file at the default location on CI
        let config = Config::load_from_file(None);
        assert!(config.is_ok());
    }

    #[test]
    fn test_display_label() {
        let server = ServerConfig {
            name: "mirror".to_string(),
            host: "ftp.example.org".to_string(),
            port: 21,
            user: "anonymous".to_string(),
            password: String::new(),
        };
        assert_eq!(server.display_label(), "mirror (ftp.example.org)");
    }

    #[test]
    fn test_server_source_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let servers = ServerSource::Toml(path).load().unwrap();
        assert_eq!(servers.len(), 2);
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }
}
