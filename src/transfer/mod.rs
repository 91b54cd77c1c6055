// Transfer orchestration
pub mod engine;
pub mod outcome;
pub mod progress;
pub mod report;

pub use engine::{TransferEngine, TransferOptions};
pub use outcome::{FailedHost, TransferOutcome};
pub use report::summarize;

use crate::selection::Host;
use crate::utils::error::TransferError;
use std::io::Write;

/// Opens a session to a host.
pub trait RemoteConnector {
    type Connection: RemoteConnection;

    fn connect(&self, host: &Host) -> Result<Self::Connection, TransferError>;
}

/// An established, authenticated session that can open file-transfer channels.
pub trait RemoteConnection {
    type Channel: RemoteChannel;

    fn open_channel(&self) -> Result<Self::Channel, TransferError>;
}

/// File operations on the remote side.
pub trait RemoteChannel {
    type File: Write;

    /// Creates `path` and any missing parents. Succeeds if it already exists.
    fn create_dir_all(&self, path: &str) -> Result<(), TransferError>;

    /// Creates or truncates a remote file for writing.
    fn create(&self, path: &str) -> Result<Self::File, TransferError>;

    fn join(&self, dir: &str, name: &str) -> String {
        remote_join(dir, name)
    }
}

/// Joins remote path segments with `/`, whatever the local separator is.
pub fn remote_join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        return name.to_string();
    }
    format!("{}/{}", dir.trim_end_matches('/'), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_join() {
        assert_eq!(remote_join("/srv/app", "a.txt"), "/srv/app/a.txt");
        assert_eq!(remote_join("/srv/app/", "a.txt"), "/srv/app/a.txt");
        assert_eq!(remote_join("/", "a.txt"), "/a.txt");
        assert_eq!(remote_join("", "a.txt"), "a.txt");
    }
}
