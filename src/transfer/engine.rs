// Sends selected files to selected hosts
use crate::selection::{FileEntry, Host, SelectionSet};
use crate::transfer::outcome::TransferOutcome;
use crate::transfer::progress::ProgressTracker;
use crate::transfer::{RemoteChannel, RemoteConnection, RemoteConnector};
use crate::utils::error::TransferError;
use crate::utils::file::PathProbe;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

const COPY_BUFFER_SIZE: usize = 32 * 1024;

#[derive(Debug, Clone, Copy, Default)]
pub struct TransferOptions {
    pub show_progress: bool,
}

/// Walks the selected hosts one at a time and pushes every selected entry to
/// each of them. A failing host or file is recorded and skipped; nothing
/// aborts the run.
pub struct TransferEngine<C> {
    connector: C,
    options: TransferOptions,
}

impl<C: RemoteConnector> TransferEngine<C> {
    pub fn new(connector: C, options: TransferOptions) -> Self {
        Self { connector, options }
    }

    pub fn run(&self, selection: &SelectionSet) -> TransferOutcome {
        let mut outcome = TransferOutcome::new();

        for host in selection.selected_hosts() {
            self.send_to_host(host, selection, &mut outcome);
        }

        outcome
    }

    fn send_to_host(&self, host: &Host, selection: &SelectionSet, outcome: &mut TransferOutcome) {
        info!("Connecting to {} ({})", host.name, host.addr());

        let connection = match self.connector.connect(host) {
            Ok(connection) => connection,
            Err(e) => {
                warn!("Host {} ({}) failed: {}", host.name, host.addr(), e);
                outcome.record_host_failure(host, e);
                return;
            }
        };

        let channel = match connection.open_channel() {
            Ok(channel) => channel,
            Err(e) => {
                warn!("Host {} ({}) failed: {}", host.name, host.addr(), e);
                outcome.record_host_failure(host, e);
                return;
            }
        };

        for entry in selection.selected_files() {
            self.send_entry(&channel, host, entry, outcome);
        }

        // channel, then connection, are dropped here
        debug!("Closing session to {}", host.name);
    }

    fn send_entry<R: RemoteChannel>(
        &self,
        channel: &R,
        host: &Host,
        entry: &FileEntry,
        outcome: &mut TransferOutcome,
    ) {
        let src = Path::new(&entry.src);

        if !PathProbe::exists(src) {
            let error = TransferError::FileNotFound {
                path: entry.src.clone(),
            };
            warn!("{}: {}", host.name, error);
            outcome.record_file_failure(entry.src.clone(), error);
            return;
        }

        if PathProbe::is_dir(src) {
            self.send_directory(channel, host, entry, outcome);
        } else if PathProbe::is_file(src) {
            match self.send_file(channel, src, &entry.dest) {
                Ok(bytes) => {
                    info!("{}: {} -> {} ({} bytes)", host.name, entry.src, entry.dest, bytes);
                    outcome.record_copied();
                }
                Err(e) => {
                    warn!("{}: {}", host.name, e);
                    outcome.record_file_failure(entry.src.clone(), e);
                }
            }
        } else {
            debug!("{}: skipping {}, not a regular file or directory", host.name, entry.src);
        }
    }

    /// Copies the immediate file children of `entry.src` into `entry.dest`.
    /// Sub-directories are not descended into.
    fn send_directory<R: RemoteChannel>(
        &self,
        channel: &R,
        host: &Host,
        entry: &FileEntry,
        outcome: &mut TransferOutcome,
    ) {
        // List first so an unreadable source leaves nothing behind remotely.
        let children = match list_children(Path::new(&entry.src)) {
            Ok(children) => children,
            Err(e) => {
                warn!("{}: cannot read directory {}: {}", host.name, entry.src, e);
                outcome.record_file_failure(entry.src.clone(), e.into());
                return;
            }
        };

        if let Err(e) = channel.create_dir_all(&entry.dest) {
            warn!("{}: {}", host.name, e);
            outcome.record_file_failure(entry.src.clone(), e);
            return;
        }

        for child in children {
            let child_display = child.display().to_string();

            if PathProbe::is_dir(&child) {
                debug!("{}: skipping sub-directory {}", host.name, child_display);
                continue;
            }
            if !PathProbe::is_file(&child) {
                debug!("{}: skipping {}, not a regular file", host.name, child_display);
                continue;
            }

            let Some(name) = child.file_name() else {
                continue;
            };
            let Some(name) = name.to_str() else {
                let error = TransferError::InvalidFileName {
                    path: child_display.clone(),
                };
                warn!("{}: {}", host.name, error);
                outcome.record_file_failure(child_display, error);
                continue;
            };
            let remote_path = channel.join(&entry.dest, name);

            match self.send_file(channel, &child, &remote_path) {
                Ok(bytes) => {
                    info!("{}: {} -> {} ({} bytes)", host.name, child_display, remote_path, bytes);
                    outcome.record_copied();
                }
                Err(e) => {
                    warn!("{}: {}", host.name, e);
                    outcome.record_file_failure(child_display, e);
                }
            }
        }
    }

    /// Streams one local file into a freshly created remote file.
    fn send_file<R: RemoteChannel>(
        &self,
        channel: &R,
        local_path: &Path,
        remote_path: &str,
    ) -> Result<u64, TransferError> {
        let local_display = local_path.display().to_string();

        let mut local_file = File::open(local_path).map_err(|e| TransferError::OpenSource {
            path: local_display.clone(),
            source: e,
        })?;
        let file_size = local_file.metadata().map(|m| m.len()).unwrap_or(0);

        let mut remote_file = channel.create(remote_path)?;

        let mut progress = ProgressTracker::new(
            file_size,
            &format!("{} -> {}", local_display, remote_path),
            self.options.show_progress,
        );
        let copy_failed = |e: std::io::Error| TransferError::CopyFailed {
            path: local_display.clone(),
            source: e,
        };

        let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
        loop {
            let bytes_read = match local_file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    progress.finish_with_error(&e.to_string());
                    return Err(copy_failed(e));
                }
            };

            if let Err(e) = remote_file.write_all(&buffer[..bytes_read]) {
                progress.finish_with_error(&e.to_string());
                return Err(copy_failed(e));
            }
            progress.add_bytes(bytes_read as u64);
        }

        if let Err(e) = remote_file.flush() {
            progress.finish_with_error(&e.to_string());
            return Err(copy_failed(e));
        }

        progress.finish();
        Ok(progress.transferred())
    }
}

fn list_children(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut children = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    children.sort();
    Ok(children)
}
