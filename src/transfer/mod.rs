//! File and directory transfers
//!
//! Downloads and uploads single files or whole trees. Directory walks are
//! breadth-first over a queue so deeply nested trees do not recurse; the
//! remote side is probed with SIZE to tell files from directories, since
//! the listing alone does not carry entry types.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::connection::FtpSession;
use crate::error::{Result, TransferError};

/// Outcome of a transfer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    /// Files transferred
    pub files: usize,

    /// Directories created
    pub directories: usize,

    /// Total bytes moved
    pub bytes: u64,
}

fn progress_bar(len: Option<u64>, name: &str) -> ProgressBar {
    let bar = match len {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::with_template(
                    "{msg} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        }
        None => ProgressBar::new_spinner(),
    };
    bar.set_message(name.to_string());
    bar
}

fn basename(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

fn join_remote(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Download a remote file or directory tree under `local_dest`.
///
/// A remote file lands as `local_dest/<basename>`; a remote directory is
/// mirrored as `local_dest/<basename>/...` with the same layout.
///
/// # Arguments
/// * `session` - Shared FTP session
/// * `remote_path` - Remote file or directory
/// * `local_dest` - Existing local directory to place the result in
///
/// # Returns
/// * `Result<TransferReport>` - Counts of what was moved
pub fn download(
    session: &Mutex<FtpSession>,
    remote_path: &str,
    local_dest: &Path,
) -> Result<TransferReport> {
    if !local_dest.is_dir() {
        return Err(TransferError::NotADirectory(local_dest.display().to_string()).into());
    }

    let mut report = TransferReport::default();

    let size = session.lock().unwrap().file_size(remote_path);
    if let Some(size) = size {
        let target = local_dest.join(basename(remote_path));
        report.bytes += download_file(session, remote_path, &target, Some(size as u64))?;
        report.files += 1;
        return Ok(report);
    }

    // Not a file: walk it as a directory tree
    let root = local_dest.join(basename(remote_path));
    let mut queue: VecDeque<(String, PathBuf)> = VecDeque::new();
    queue.push_back((remote_path.to_string(), root));

    while let Some((remote_dir, local_dir)) = queue.pop_front() {
        let names = {
            let mut session = session.lock().unwrap();
            session.change_directory(&remote_dir).map_err(|_| {
                TransferError::NoSuchRemotePath(remote_dir.clone())
            })?;
            session.list_current_directory()?
        };
        fs::create_dir_all(&local_dir)?;
        report.directories += 1;
        debug!(dir = %remote_dir, entries = names.len(), "walking remote directory");

        for name in names {
            let name = basename(&name).to_string();
            let remote_entry = join_remote(&remote_dir, &name);
            let size = session.lock().unwrap().file_size(&remote_entry);
            match size {
                Some(size) => {
                    report.bytes +=
                        download_file(session, &remote_entry, &local_dir.join(&name), Some(size as u64))?;
                    report.files += 1;
                }
                None => queue.push_back((remote_entry, local_dir.join(&name))),
            }
        }
    }

    info!(files = report.files, bytes = report.bytes, "download complete");
    Ok(report)
}

fn download_file(
    session: &Mutex<FtpSession>,
    remote_path: &str,
    local_path: &Path,
    size: Option<u64>,
) -> Result<u64> {
    let bar = progress_bar(size, basename(remote_path));
    let file = File::create(local_path)?;
    let mut writer = bar.wrap_write(file);
    let written = session
        .lock()
        .unwrap()
        .download_to(remote_path, &mut writer)?;
    bar.finish_and_clear();
    Ok(written)
}

/// Upload a local file or directory tree under `remote_dest`.
///
/// A local file lands as `remote_dest/<basename>`; a local directory is
/// mirrored as `remote_dest/<basename>/...`, creating remote directories
/// as the walk reaches them.
///
/// # Arguments
/// * `session` - Shared FTP session
/// * `local_path` - Local file or directory
/// * `remote_dest` - Existing remote directory to place the result in
///
/// # Returns
/// * `Result<TransferReport>` - Counts of what was moved
pub fn upload(
    session: &Mutex<FtpSession>,
    local_path: &Path,
    remote_dest: &str,
) -> Result<TransferReport> {
    if !local_path.exists() {
        return Err(TransferError::NoSuchLocalPath(local_path.display().to_string()).into());
    }

    let mut report = TransferReport::default();
    let name = local_path
        .file_name()
        .ok_or_else(|| TransferError::NoSuchLocalPath(local_path.display().to_string()))?
        .to_string_lossy()
        .into_owned();

    if local_path.is_file() {
        report.bytes += upload_file(session, local_path, &join_remote(remote_dest, &name))?;
        report.files += 1;
        return Ok(report);
    }

    let mut queue: VecDeque<(PathBuf, String)> = VecDeque::new();
    queue.push_back((local_path.to_path_buf(), join_remote(remote_dest, &name)));

    while let Some((local_dir, remote_dir)) = queue.pop_front() {
        // MKD fails if the directory already exists; uploading into an
        // existing tree is allowed, so that failure is not fatal
        let _ = session.lock().unwrap().make_directory(&remote_dir);
        report.directories += 1;
        debug!(dir = %local_dir.display(), "walking local directory");

        for entry in fs::read_dir(&local_dir)? {
            let entry = entry?;
            let entry_name = entry.file_name().to_string_lossy().into_owned();
            let remote_entry = join_remote(&remote_dir, &entry_name);
            if entry.path().is_dir() {
                queue.push_back((entry.path(), remote_entry));
            } else {
                report.bytes += upload_file(session, &entry.path(), &remote_entry)?;
                report.files += 1;
            }
        }
    }

    info!(files = report.files, bytes = report.bytes, "upload complete");
    Ok(report)
}

fn upload_file(session: &Mutex<FtpSession>, local_path: &Path, remote_path: &str) -> Result<u64> {
    let size = fs::metadata(local_path).map(|m| m.len()).ok();
    let bar = progress_bar(size, basename(remote_path));
    let file = File::open(local_path)?;
    let mut reader = bar.wrap_read(file);
    let sent = session
        .lock()
        .unwrap()
        .upload_from(&mut reader, remote_path)?;
    bar.finish_and_clear();
    Ok(sent)
}
