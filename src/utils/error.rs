use std::path::PathBuf;
use thiserror::Error;

/// Failures isolated to a single host or a single file during a run.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Failed to connect to {addr}: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Authentication failed for user {user}")]
    AuthenticationFailed { user: String },

    #[error("Host key for {addr} is not trusted: {reason}")]
    UntrustedHostKey { addr: String, reason: String },

    #[error("Failed to open SFTP channel: {message}")]
    ChannelFailed { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File name of {path} is not valid UTF-8")]
    InvalidFileName { path: String },

    #[error("Failed to open local file {path}: {source}")]
    OpenSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create remote directory {path}: {message}")]
    RemoteDirectory { path: String, message: String },

    #[error("Failed to create remote file {path}: {message}")]
    RemoteCreate { path: String, message: String },

    #[error("Failed to copy {path}: {source}")]
    CopyFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("SSH error: {0}")]
    SshError(#[from] ssh2::Error),
}

impl TransferError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransferError::FileNotFound { .. })
    }
}

/// Fatal problems with the configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file path is not set")]
    MissingPath,

    #[error("{} could not be found", path.display())]
    NotFound { path: PathBuf },

    #[error("Could not open config file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} could not be decoded as JSON: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
