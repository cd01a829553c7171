//! Password-decoding strategies for imported server configs.
//!
//! FileZilla exports store passwords with an `encoding` attribute; this module
//! maps that attribute to a decoding strategy. Unknown encodings are a config
//! error rather than a panic so a single unreadable entry does not take down
//! the whole import.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{ConfigError, Result};

/// Strategy for turning a stored password into plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordDecoder {
    /// Password is stored as-is.
    Plain,

    /// Password is base64-encoded UTF-8.
    Base64,
}

impl PasswordDecoder {
    /// Select a decoder for the given encoding attribute.
    ///
    /// # Arguments
    /// * `encoding` - The `encoding` attribute value; empty means plain text
    ///
    /// # Returns
    /// * `Result<Self>` - Decoder, or a config error for unknown encodings
    pub fn for_encoding(encoding: &str) -> Result<Self> {
        match encoding {
            "" | "plain" => Ok(PasswordDecoder::Plain),
            "base64" => Ok(PasswordDecoder::Base64),
            other => Err(ConfigError::UnsupportedEncoding(other.to_string()).into()),
        }
    }

    /// Decode a stored password.
    pub fn decode(&self, raw: &str) -> Result<String> {
        match self {
            PasswordDecoder::Plain => Ok(raw.to_string()),
            PasswordDecoder::Base64 => {
                let bytes = STANDARD.decode(raw)?;
                String::from_utf8(bytes)
                    .map_err(|e| ConfigError::InvalidPassword(e.to_string()).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passthrough() {
        let decoder = PasswordDecoder::for_encoding("").unwrap();
        assert_eq!(decoder.decode("hunter2").unwrap(), "hunter2");
    }

    #[test]
    fn test_base64_decode() {
        let decoder = PasswordDecoder::for_encoding("base64").unwrap();
        assert_eq!(decoder.decode("aHVudGVyMg==").unwrap(), "hunter2");
    }

    #[test]
    fn test_base64_rejects_garbage() {
        let decoder = PasswordDecoder::Base64;
        assert!(decoder.decode("not base64!!").is_err());
    }

    #[test]
    fn test_unknown_encoding() {
        let err = PasswordDecoder::for_encoding("rot13").unwrap_err();
        assert!(err.to_string().contains("rot13"));
    }
}
