//! Connection management for the FTP server
//!
//! This module provides session management functionality including:
//! - Connection establishment and login
//! - Directory navigation and listing
//! - File and directory probing
//! - Streamed uploads and downloads
//! - Clean session shutdown

use std::io::{Read, Write};
use std::sync::{Arc, Mutex};

use suppaftp::types::FileType;
use suppaftp::FtpStream;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::error::{ConnectionError, Result};
use crate::repl::completion::RemoteDirSource;

/// An authenticated FTP session.
///
/// Wraps the control connection; every method is a blocking round trip on
/// that connection, so a session must not be driven from two threads at
/// once. Share it behind [`Arc<Mutex<FtpSession>>`], which also implements
/// [`RemoteDirSource`] for the completion worker.
pub struct FtpSession {
    stream: FtpStream,

    /// Host the session was opened against, for display
    host: String,
}

impl FtpSession {
    /// Connect and log in using the given server entry
    ///
    /// # Arguments
    /// * `server` - Host, port and credentials
    ///
    /// # Returns
    /// * `Result<Self>` - Authenticated session or error
    pub fn connect(server: &ServerConfig) -> Result<Self> {
        info!(host = %server.host, port = server.port, "connecting");
        let mut stream = FtpStream::connect((server.host.as_str(), server.port))
            .map_err(|e| ConnectionError::ConnectionFailed(e.to_string()))?;

        stream
            .login(&server.user, &server.password)
            .map_err(|e| ConnectionError::LoginFailed(e.to_string()))?;

        // Binary mode; ASCII mode would mangle arbitrary file content
        stream.transfer_type(FileType::Binary)?;

        info!(host = %server.host, user = %server.user, "logged in");
        Ok(Self {
            stream,
            host: server.host.clone(),
        })
    }

    /// Host this session is connected to
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Change the remote working directory
    pub fn change_directory(&mut self, path: &str) -> Result<()> {
        debug!(path = %path, "cwd");
        self.stream.cwd(path)?;
        Ok(())
    }

    /// Current remote working directory
    pub fn current_directory(&mut self) -> Result<String> {
        Ok(self.stream.pwd()?)
    }

    /// List entry names in the current remote directory
    pub fn list_current_directory(&mut self) -> Result<Vec<String>> {
        Ok(self.stream.nlst(None)?)
    }

    /// List entry names under `path` without changing directory
    pub fn list_names(&mut self, path: &str) -> Result<Vec<String>> {
        Ok(self.stream.nlst(Some(path))?)
    }

    /// Create a remote directory
    pub fn make_directory(&mut self, path: &str) -> Result<()> {
        debug!(path = %path, "mkdir");
        self.stream.mkdir(path)?;
        Ok(())
    }

    /// Size of a remote file, or `None` if the path is not a regular file.
    ///
    /// SIZE fails for directories and missing paths alike, which makes this
    /// the is-this-a-file probe used when walking remote trees.
    pub fn file_size(&mut self, path: &str) -> Option<usize> {
        self.stream.size(path).ok()
    }

    /// Download a remote file into the given writer
    ///
    /// # Arguments
    /// * `remote_path` - Remote file to retrieve
    /// * `dest` - Where the bytes go
    ///
    /// # Returns
    /// * `Result<u64>` - Number of bytes written
    pub fn download_to<W: Write>(&mut self, remote_path: &str, dest: &mut W) -> Result<u64> {
        debug!(path = %remote_path, "retr");
        let mut data = self.stream.retr_as_stream(remote_path)?;
        let written = std::io::copy(&mut data, dest)?;
        self.stream.finalize_retr_stream(data)?;
        Ok(written)
    }

    /// Upload from the given reader to a remote file
    ///
    /// # Arguments
    /// * `src` - Source of the bytes
    /// * `remote_path` - Remote file to create or overwrite
    ///
    /// # Returns
    /// * `Result<u64>` - Number of bytes sent
    pub fn upload_from<R: Read>(&mut self, src: &mut R, remote_path: &str) -> Result<u64> {
        debug!(path = %remote_path, "stor");
        let mut sink = self.stream.put_with_stream(remote_path)?;
        let sent = std::io::copy(src, &mut sink)?;
        self.stream.finalize_put_stream(sink)?;
        Ok(sent)
    }

    /// Close the session politely
    pub fn quit(mut self) -> Result<()> {
        self.stream.quit()?;
        Ok(())
    }
}

impl RemoteDirSource for FtpSession {
    fn change_directory(&mut self, path: &str) -> Result<()> {
        FtpSession::change_directory(self, path)
    }

    fn list_current_directory(&mut self) -> Result<Vec<String>> {
        FtpSession::list_current_directory(self)
    }
}

impl RemoteDirSource for Arc<Mutex<FtpSession>> {
    fn change_directory(&mut self, path: &str) -> Result<()> {
        self.lock().unwrap().change_directory(path)
    }

    fn list_current_directory(&mut self) -> Result<Vec<String>> {
        self.lock().unwrap().list_current_directory()
    }

    /// Hold the lock across both control-connection steps so a foreground
    /// command cannot slip a request between the cwd and the listing.
    fn fetch_listing(&mut self, path: &str) -> Result<Vec<String>> {
        let mut session = self.lock().unwrap();
        session.change_directory(path)?;
        session.list_current_directory()
    }
}
