// SSH/SFTP implementation of the remote transfer capability
pub mod client;
pub mod session;

pub use client::{HostKeyPolicy, Ssh2Connector, SshClient, CONNECT_TIMEOUT};
pub use session::SftpChannel;
