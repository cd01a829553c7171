//! Error handling module for ftpsh.
//!
//! Provides the crate-wide error taxonomy:
//! - Structured error kinds per subsystem (connection, config, state, transfer)
//! - A single top-level [`FtpshError`] with `From` conversions so `?` works
//!   across module boundaries
//! - The crate-wide [`Result`] alias
//!
//! Network and protocol failures that occur during background directory
//! fetches never surface through these types to the interactive prompt; they
//! are contained inside the completion scheduler and downgraded to a failed
//! poll outcome (see `repl::completion`).

pub mod kinds;

// Re-export commonly used types
pub use kinds::{
    ConfigError, ConnectionError, FtpshError, Result, StateError, TransferError,
};
