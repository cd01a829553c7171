//! Command-line interface for ftpsh
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Shell completion script generation

use std::path::PathBuf;
use std::str::FromStr;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::{Config, ServerSource};
use crate::error::Result;

/// Interactive FTP client with remote path completion
#[derive(Parser, Debug)]
#[command(
    name = "ftpsh",
    version,
    about = "Interactive FTP client with remote path completion",
    long_about = "An interactive FTP file-transfer client. Remote paths tab-complete
against live server listings without blocking the prompt."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Read servers from a FileZilla sitemanager XML export
    #[arg(long, value_name = "FILE")]
    pub filezilla: Option<PathBuf>,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for ftpsh
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Choose a server and remember the choice
    Select,

    /// List a remote directory
    Ls {
        /// Remote directory to list
        #[arg(value_name = "PATH", default_value = "/")]
        path: String,
    },

    /// Download a remote file or directory
    Download {
        /// Remote file or directory; prompts when omitted
        #[arg(value_name = "REMOTE")]
        remote: Option<String>,

        /// Local destination directory
        #[arg(value_name = "DEST", default_value = ".")]
        dest: PathBuf,
    },

    /// Upload a local file or directory
    Upload {
        /// Local file or directory; prompts when omitted
        #[arg(value_name = "LOCAL")]
        local: Option<PathBuf>,

        /// Remote destination directory
        #[arg(value_name = "DEST", default_value = "/")]
        dest: String,
    },

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        // A FileZilla export replaces the server list but leaves the rest
        // of the configuration alone
        if let Some(path) = &args.filezilla {
            config.servers = ServerSource::FileZilla(path.clone()).load()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parsed arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle subcommands that need no connection
    ///
    /// # Returns
    /// * `Result<bool>` - True if the subcommand was handled here
    pub fn handle_offline_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Completion { shell }) => {
                self.generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show }) => {
                self.handle_config_command(*show)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Generate shell completion script
    ///
    /// # Arguments
    /// * `shell` - Shell type
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    fn generate_completion(&self, shell: &str) -> Result<()> {
        let shell = Shell::from_str(shell)
            .map_err(|_| format!("unsupported shell: {shell} (try bash, zsh, fish, powershell)"))?;
        let mut command = CliArgs::command();
        clap_complete::generate(shell, &mut command, "ftpsh", &mut std::io::stdout());
        Ok(())
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to print the effective configuration
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    fn handle_config_command(&self, show: bool) -> Result<()> {
        if show {
            let rendered = toml::to_string_pretty(&self.config)
                .map_err(|e| format!("cannot render configuration: {e}"))?;
            println!("{rendered}");
        } else {
            println!("Configuration OK ({} servers)", self.config.servers.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let args = CliArgs::parse_from(["ftpsh"]);
        assert!(args.command.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_download_defaults() {
        let args = CliArgs::parse_from(["ftpsh", "download", "/pub/file.txt"]);
        match args.command {
            Some(Commands::Download { remote, dest }) => {
                assert_eq!(remote.as_deref(), Some("/pub/file.txt"));
                assert_eq!(dest, PathBuf::from("."));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_filezilla_flag() {
        let args = CliArgs::parse_from(["ftpsh", "--filezilla", "/tmp/sm.xml", "select"]);
        assert_eq!(args.filezilla, Some(PathBuf::from("/tmp/sm.xml")));
        assert!(matches!(args.command, Some(Commands::Select)));
    }

    #[test]
    fn test_verify_cli() {
        CliArgs::command().debug_assert();
    }
}
