//! Terminal output helpers and interactive selection

use dialoguer::Select;
use nu_ansi_term::Color;

use crate::config::ServerConfig;
use crate::error::{ConnectionError, FtpshError, Result};

/// Pick one server from the configured list.
///
/// # Arguments
/// * `servers` - Configured servers, in config order
///
/// # Returns
/// * `Result<&ServerConfig>` - The chosen entry
pub fn select_server(servers: &[ServerConfig]) -> Result<&ServerConfig> {
    if servers.is_empty() {
        return Err(ConnectionError::NoServerSelected.into());
    }
    if servers.len() == 1 {
        return Ok(&servers[0]);
    }

    let labels: Vec<String> = servers.iter().map(|s| s.display_label()).collect();
    let choice = Select::new()
        .with_prompt("Select a server")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| FtpshError::Generic(format!("selection aborted: {e}")))?;

    Ok(&servers[choice])
}

/// Print an informational line
pub fn print_info(message: &str) {
    println!("{}", Color::Cyan.paint(message));
}

/// Print a success line
pub fn print_success(message: &str) {
    println!("{}", Color::Green.paint(message));
}

/// Print an error line to stderr
pub fn print_error(message: &str) {
    eprintln!("{}", Color::Red.bold().paint(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_with_no_servers_is_an_error() {
        assert!(select_server(&[]).is_err());
    }

    #[test]
    fn test_single_server_is_chosen_without_prompting() {
        let servers = vec![ServerConfig {
            name: "only".to_string(),
            host: "ftp.example.com".to_string(),
            port: 21,
            user: "anonymous".to_string(),
            password: String::new(),
        }];
        let chosen = select_server(&servers).unwrap();
        assert_eq!(chosen.name, "only");
    }
}
