//! ftpsh - Interactive FTP client
//!
//! An FTP file-transfer client whose remote path prompts tab-complete
//! against live server listings without ever blocking on the network.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! ftpsh
//!
//! # Direct transfers
//! ftpsh download /pub/file.txt .
//! ftpsh upload ./report.pdf /incoming
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::Level;

use ftpsh::cli::{CliInterface, Commands};
use ftpsh::config::ServerConfig;
use ftpsh::connection::FtpSession;
use ftpsh::error::Result;
use ftpsh::repl::{LocalPathCompleter, PathPrompter, RemotePathCompleter};
use ftpsh::state::{AppState, StateFile};
use ftpsh::{transfer, ui};

/// Application entry point
fn main() {
    if let Err(e) = run() {
        ui::print_error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle offline subcommands (completion, config)
/// 4. Resolve the server, connect, dispatch the requested operation
///
/// # Returns
/// * `Result<()>` - Success or error
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_offline_subcommand()? {
        return Ok(());
    }

    let state_file = StateFile::default_location()?;
    let mut state = state_file.load()?;

    if matches!(cli.args().command, Some(Commands::Select)) {
        let server = ui::select_server(&cli.config().servers)?.clone();
        ui::print_success(&format!("Selected {}", server.display_label()));
        state.selected_server = Some(server);
        state_file.save(&state)?;
        return Ok(());
    }

    let server = resolve_server(&cli, &state_file, &mut state)?;
    ui::print_info(&format!("Connecting to {}", server.display_label()));
    let session = Arc::new(Mutex::new(FtpSession::connect(&server)?));

    let outcome = dispatch(&cli, &session);

    // Politely close the control connection when we still hold the last
    // reference; the completion worker may hold one briefly after a prompt
    if let Ok(mutex) = Arc::try_unwrap(session) {
        if let Ok(session) = mutex.into_inner() {
            let _ = session.quit();
        }
    }

    outcome
}

/// Pick the server to connect to, remembering the choice across runs
fn resolve_server(
    cli: &CliInterface,
    state_file: &StateFile,
    state: &mut AppState,
) -> Result<ServerConfig> {
    if let Some(server) = &state.selected_server {
        // A remembered server that vanished from the config is stale
        if cli.config().servers.iter().any(|s| s == server) {
            return Ok(server.clone());
        }
    }

    let server = ui::select_server(&cli.config().servers)?.clone();
    state.selected_server = Some(server.clone());
    state_file.save(state)?;
    Ok(server)
}

/// Run the requested operation against the connected session
fn dispatch(cli: &CliInterface, session: &Arc<Mutex<FtpSession>>) -> Result<()> {
    match &cli.args().command {
        Some(Commands::Ls { path }) => {
            let names = session.lock().unwrap().list_names(path)?;
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
        Some(Commands::Download { remote, dest }) => {
            let remote = match remote {
                Some(remote) => remote.clone(),
                None => match prompt_remote_path(cli, session, "Remote path to download")? {
                    Some(path) => path,
                    None => return Ok(()),
                },
            };
            let report = transfer::download(session, &remote, dest)?;
            ui::print_success(&format!(
                "Downloaded {} file(s), {} byte(s)",
                report.files, report.bytes
            ));
            Ok(())
        }
        Some(Commands::Upload { local, dest }) => {
            let local = match local {
                Some(local) => local.clone(),
                None => match prompt_local_path(cli, "Local path to upload")? {
                    Some(path) => path,
                    None => return Ok(()),
                },
            };
            let report = transfer::upload(session, &local, dest)?;
            ui::print_success(&format!(
                "Uploaded {} file(s), {} byte(s)",
                report.files, report.bytes
            ));
            Ok(())
        }
        None => run_interactive(cli, session),
        // Handled before the connection was opened
        Some(Commands::Select | Commands::Completion { .. } | Commands::Config { .. }) => Ok(()),
    }
}

/// Interactive loop: choose an action, prompt for paths, transfer, repeat
fn run_interactive(cli: &CliInterface, session: &Arc<Mutex<FtpSession>>) -> Result<()> {
    loop {
        let actions = ["download", "upload", "quit"];
        let choice = dialoguer::Select::new()
            .with_prompt("Action")
            .items(&actions)
            .default(0)
            .interact()
            .map_err(|e| format!("selection aborted: {e}"))?;

        match actions[choice] {
            "download" => {
                let Some(remote) = prompt_remote_path(cli, session, "Remote path")? else {
                    continue;
                };
                let report = transfer::download(session, &remote, std::path::Path::new("."))?;
                ui::print_success(&format!(
                    "Downloaded {} file(s), {} byte(s)",
                    report.files, report.bytes
                ));
            }
            "upload" => {
                let Some(local) = prompt_local_path(cli, "Local path")? else {
                    continue;
                };
                let Some(dest) = prompt_remote_path(cli, session, "Remote destination")? else {
                    continue;
                };
                let report = transfer::upload(session, &local, &dest)?;
                ui::print_success(&format!(
                    "Uploaded {} file(s), {} byte(s)",
                    report.files, report.bytes
                ));
            }
            _ => return Ok(()),
        }
    }
}

/// Read a remote path with live tab-completion
fn prompt_remote_path(
    cli: &CliInterface,
    session: &Arc<Mutex<FtpSession>>,
    label: &str,
) -> Result<Option<String>> {
    let completer = RemotePathCompleter::new(Arc::clone(session));
    let mut prompter = PathPrompter::new(label, Box::new(completer), Some(&cli.config().history))?;
    Ok(prompter.read()?.filter(|line| !line.is_empty()))
}

/// Read a local path with filesystem tab-completion
fn prompt_local_path(cli: &CliInterface, label: &str) -> Result<Option<PathBuf>> {
    let mut prompter = PathPrompter::new(
        label,
        Box::new(LocalPathCompleter),
        Some(&cli.config().history),
    )?;
    Ok(prompter.read()?.filter(|line| !line.is_empty()).map(PathBuf::from))
}

/// Initialize the tracing subscriber from verbosity flags and config
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    // Build subscriber with level filter
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    // Configure timestamps
    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
