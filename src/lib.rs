//! Interactive FTP Client Library
//!
//! This library provides the core functionality for the ftpsh FTP client.
//! It can be used as a standalone library to build FTP tools and applications.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management, FileZilla import
//! - `connection`: FTP session management
//! - `error`: Error types and handling
//! - `repl`: Interactive prompts and path completion
//! - `state`: Persisted application state
//! - `transfer`: File and directory transfers
//! - `ui`: Terminal output and selection menus
//!
//! # Example
//!
//! ```no_run
//! use ftpsh::config::ServerConfig;
//! use ftpsh::connection::FtpSession;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = ServerConfig {
//!         name: "mirror".to_string(),
//!         host: "ftp.example.org".to_string(),
//!         port: 21,
//!         user: "anonymous".to_string(),
//!         password: String::new(),
//!     };
//!
//!     let mut session = FtpSession::connect(&server)?;
//!     for name in session.list_names("/pub")? {
//!         println!("{name}");
//!     }
//!     session.quit()?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod repl;
pub mod state;
pub mod transfer;
pub mod ui;

// Re-export commonly used types
pub use config::{Config, ServerConfig};
pub use connection::FtpSession;
pub use error::{FtpshError, Result};
pub use repl::{PathCompletionEngine, RemoteDirSource, RemotePathCompleter};
pub use state::{AppState, StateFile};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
