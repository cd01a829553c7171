//! FileZilla site-export import.
//!
//! Parses the `<FileZilla3><Servers><Server>` XML structure produced by
//! FileZilla's site manager export. Passwords carry an `encoding` attribute
//! and go through [`PasswordDecoder`].

use std::path::Path;

use serde::Deserialize;

use super::password::PasswordDecoder;
use super::ServerConfig;
use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
struct FileZillaDocument {
    #[serde(rename = "Servers", default)]
    servers: Option<ServerList>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerList {
    #[serde(rename = "Server", default)]
    servers: Vec<XmlServer>,
}

#[derive(Debug, Deserialize)]
struct XmlServer {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Host", default)]
    host: String,
    #[serde(rename = "Port", default)]
    port: Option<u16>,
    #[serde(rename = "User", default)]
    user: String,
    #[serde(rename = "Pass")]
    pass: Option<XmlPassword>,
}

#[derive(Debug, Deserialize)]
struct XmlPassword {
    #[serde(rename = "@encoding", default)]
    encoding: String,
    #[serde(rename = "$text", default)]
    value: String,
}

/// Parse server entries from a FileZilla XML export file.
pub fn parse_filezilla_file(path: &Path) -> Result<Vec<ServerConfig>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
    parse_filezilla(&raw)
}

/// Parse server entries from FileZilla XML text.
pub fn parse_filezilla(xml: &str) -> Result<Vec<ServerConfig>> {
    let document: FileZillaDocument = quick_xml::de::from_str(xml)?;
    let entries = document.servers.unwrap_or_default().servers;

    let mut servers = Vec::with_capacity(entries.len());
    for entry in entries {
        let password = match &entry.pass {
            Some(pass) => PasswordDecoder::for_encoding(&pass.encoding)?.decode(&pass.value)?,
            None => String::new(),
        };
        servers.push(ServerConfig {
            name: entry.name,
            host: entry.host,
            port: entry.port.unwrap_or(21),
            user: entry.user,
            password,
        });
    }
    Ok(servers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FileZilla3 version="3.66.4" platform="*nix">
  <Servers>
    <Server>
      <Host>ftp.example.org</Host>
      <Port>21</Port>
      <User>anonymous</User>
      <Pass encoding="base64">Z3Vlc3Q=</Pass>
      <Name>mirror</Name>
    </Server>
    <Server>
      <Host>backup.example.org</Host>
      <User>ops</User>
      <Name>backup</Name>
    </Server>
  </Servers>
</FileZilla3>"#;

    #[test]
    fn test_parse_servers() {
        let servers = parse_filezilla(SAMPLE).unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].name, "mirror");
        assert_eq!(servers[0].host, "ftp.example.org");
        assert_eq!(servers[0].user, "anonymous");
    }

    #[test]
    fn test_password_decoded() {
        let servers = parse_filezilla(SAMPLE).unwrap();
        assert_eq!(servers[0].password, "guest");
    }

    #[test]
    fn test_missing_password_and_port() {
        let servers = parse_filezilla(SAMPLE).unwrap();
        assert_eq!(servers[1].password, "");
        assert_eq!(servers[1].port, 21);
    }

    #[test]
    fn test_unknown_encoding_is_error() {
        let xml = r#"<FileZilla3><Servers><Server>
            <Host>h</Host><User>u</User><Name>n</Name>
            <Pass encoding="rot13">x</Pass>
        </Server></Servers></FileZilla3>"#;
        assert!(parse_filezilla(xml).is_err());
    }

    #[test]
    fn test_empty_document() {
        let servers = parse_filezilla("<FileZilla3></FileZilla3>").unwrap();
        assert!(servers.is_empty());
    }
}
