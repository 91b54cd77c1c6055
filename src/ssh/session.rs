// SFTP channel operations
use crate::transfer::RemoteChannel;
use crate::utils::error::TransferError;
use ssh2::Sftp;
use std::path::{Path, PathBuf};

const DIR_MODE: i32 = 0o755;

pub struct SftpChannel {
    sftp: Sftp,
}

impl SftpChannel {
    pub fn new(sftp: Sftp) -> Self {
        Self { sftp }
    }

    fn is_remote_dir(&self, path: &Path) -> bool {
        matches!(self.sftp.stat(path), Ok(stat) if stat.is_dir())
    }
}

impl RemoteChannel for SftpChannel {
    type File = ssh2::File;

    fn create_dir_all(&self, path: &str) -> Result<(), TransferError> {
        let dir_path = Path::new(path);
        let fail = |message: String| TransferError::RemoteDirectory {
            path: path.to_string(),
            message,
        };

        if path.is_empty() {
            return Err(fail("empty path".to_string()));
        }

        if let Ok(stat) = self.sftp.stat(dir_path) {
            if !stat.is_dir() {
                return Err(fail("path exists but is not a directory".to_string()));
            }
        }

        let missing = missing_dirs(dir_path, |p| self.is_remote_dir(p));
        for dir in &missing {
            log::debug!("creating remote directory {}", dir.display());
            if let Err(e) = self.sftp.mkdir(dir, DIR_MODE) {
                // Someone else may have created it in between.
                if !self.is_remote_dir(dir) {
                    return Err(fail(format!("{}: {}", dir.display(), e)));
                }
            }
        }

        Ok(())
    }

    fn create(&self, path: &str) -> Result<ssh2::File, TransferError> {
        self.sftp
            .create(Path::new(path))
            .map_err(|e| TransferError::RemoteCreate {
                path: path.to_string(),
                message: e.to_string(),
            })
    }
}

/// Directories that must be created, outermost first, so that `path` exists.
/// Walks up until `is_dir` reports an existing ancestor; `/` and the empty
/// parent of a relative path are never returned as ancestors.
pub fn missing_dirs(path: &Path, is_dir: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    if path.as_os_str().is_empty() || is_dir(path) {
        return Vec::new();
    }

    let mut missing = Vec::new();
    let mut current = path;
    loop {
        missing.push(current.to_path_buf());
        match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && parent != Path::new("/") => {
                if is_dir(parent) {
                    break;
                }
                current = parent;
            }
            _ => break,
        }
    }

    missing.reverse();
    missing
}
