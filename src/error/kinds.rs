use std::{fmt, io};

/// Crate-wide `Result` type using [`FtpshError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, FtpshError>;

/// Top-level error type for ftpsh operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum FtpshError {
    /// Connection-related errors.
    Connection(ConnectionError),

    /// Configuration errors.
    Config(ConfigError),

    /// State-file errors.
    State(StateError),

    /// Upload/download errors.
    Transfer(TransferError),

    /// I/O errors.
    Io(io::Error),

    /// FTP protocol errors from the underlying client.
    Ftp(suppaftp::FtpError),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectionFailed(String),

    /// Login was rejected by the server.
    LoginFailed(String),

    /// No server has been selected yet.
    NoServerSelected,
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Missing required field.
    MissingField(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Stored password uses an encoding we cannot decode.
    UnsupportedEncoding(String),

    /// Stored password could not be decoded.
    InvalidPassword(String),
}

/// State-file errors.
#[derive(Debug)]
pub enum StateError {
    /// State file could not be read or parsed.
    ReadFailed(String),

    /// State file could not be written.
    WriteFailed(String),

    /// No usable state directory on this platform.
    NoStateDirectory,
}

/// Upload/download errors.
#[derive(Debug)]
pub enum TransferError {
    /// Remote path does not exist.
    NoSuchRemotePath(String),

    /// Local path does not exist.
    NoSuchLocalPath(String),

    /// Operation requires a directory but was given something else.
    NotADirectory(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for FtpshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpshError::Connection(e) => write!(f, "Connection error: {e}"),
            FtpshError::Config(e) => write!(f, "Configuration error: {e}"),
            FtpshError::State(e) => write!(f, "State error: {e}"),
            FtpshError::Transfer(e) => write!(f, "Transfer error: {e}"),
            FtpshError::Io(e) => write!(f, "I/O error: {e}"),
            FtpshError::Ftp(e) => write!(f, "FTP error: {e}"),
            FtpshError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::LoginFailed(msg) => write!(f, "Login failed: {msg}"),
            ConnectionError::NoServerSelected => {
                write!(f, "No FTP server selected (run `ftpsh select` first)")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::MissingField(field) => write!(f, "Missing required field: {field}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::UnsupportedEncoding(enc) => {
                write!(f, "Unsupported password encoding: {enc}")
            }
            ConfigError::InvalidPassword(msg) => write!(f, "Could not decode password: {msg}"),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::ReadFailed(msg) => write!(f, "Failed to read state file: {msg}"),
            StateError::WriteFailed(msg) => write!(f, "Failed to write state file: {msg}"),
            StateError::NoStateDirectory => write!(f, "No state directory available"),
        }
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::NoSuchRemotePath(path) => {
                write!(f, "No such file/dir in FTP path: {path}")
            }
            TransferError::NoSuchLocalPath(path) => {
                write!(f, "No such file/dir in local fs: {path}")
            }
            TransferError::NotADirectory(path) => write!(f, "Not a directory: {path}"),
        }
    }
}

impl std::error::Error for FtpshError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StateError {}
impl std::error::Error for TransferError {}

/* ========================= Conversions to FtpshError ========================= */

impl From<io::Error> for FtpshError {
    fn from(err: io::Error) -> Self {
        FtpshError::Io(err)
    }
}

impl From<suppaftp::FtpError> for FtpshError {
    fn from(err: suppaftp::FtpError) -> Self {
        FtpshError::Ftp(err)
    }
}

impl From<ConnectionError> for FtpshError {
    fn from(err: ConnectionError) -> Self {
        FtpshError::Connection(err)
    }
}

impl From<ConfigError> for FtpshError {
    fn from(err: ConfigError) -> Self {
        FtpshError::Config(err)
    }
}

impl From<StateError> for FtpshError {
    fn from(err: StateError) -> Self {
        FtpshError::State(err)
    }
}

impl From<TransferError> for FtpshError {
    fn from(err: TransferError) -> Self {
        FtpshError::Transfer(err)
    }
}

impl From<toml::de::Error> for FtpshError {
    fn from(err: toml::de::Error) -> Self {
        FtpshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<quick_xml::DeError> for FtpshError {
    fn from(err: quick_xml::DeError) -> Self {
        FtpshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<base64::DecodeError> for FtpshError {
    fn from(err: base64::DecodeError) -> Self {
        FtpshError::Config(ConfigError::InvalidPassword(err.to_string()))
    }
}

impl From<String> for FtpshError {
    fn from(msg: String) -> Self {
        FtpshError::Generic(msg)
    }
}

impl From<&str> for FtpshError {
    fn from(msg: &str) -> Self {
        FtpshError::Generic(msg.to_owned())
    }
}
