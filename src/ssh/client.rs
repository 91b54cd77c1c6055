// SSH client wrapper
use crate::selection::Host;
use crate::ssh::session::SftpChannel;
use crate::transfer::{RemoteConnection, RemoteConnector};
use crate::utils::error::TransferError;
use clap::ValueEnum;
use ssh2::{CheckResult, KnownHostFileKind, Session};
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

/// Bounds the TCP connect, handshake and authentication. Transfers that
/// follow run without a limit.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// What to do with the host key a server presents.
///
/// `AcceptAny` trusts whatever key is offered. That is the long-standing
/// behavior of this tool and stays the default; `KnownHosts` requires a
/// matching entry in `~/.ssh/known_hosts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HostKeyPolicy {
    #[default]
    AcceptAny,
    KnownHosts,
}

impl HostKeyPolicy {
    fn verify(self, session: &Session, host: &Host) -> Result<(), TransferError> {
        if self == HostKeyPolicy::AcceptAny {
            return Ok(());
        }

        let untrusted = |reason: String| TransferError::UntrustedHostKey {
            addr: host.addr(),
            reason,
        };

        let path = known_hosts_path()
            .ok_or_else(|| untrusted("cannot determine home directory".to_string()))?;
        let mut known_hosts = session.known_hosts()?;
        known_hosts
            .read_file(&path, KnownHostFileKind::OpenSSH)
            .map_err(|e| untrusted(format!("cannot read {}: {}", path.display(), e)))?;

        let (key, _) = session
            .host_key()
            .ok_or_else(|| untrusted("server presented no host key".to_string()))?;

        match known_hosts.check_port(&host.ip, host.port, key) {
            CheckResult::Match => Ok(()),
            CheckResult::Mismatch => Err(untrusted("key does not match known_hosts".to_string())),
            CheckResult::NotFound => Err(untrusted("host is not in known_hosts".to_string())),
            CheckResult::Failure => Err(untrusted("known_hosts lookup failed".to_string())),
        }
    }
}

fn known_hosts_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".ssh").join("known_hosts"))
}

/// An authenticated SSH session to one host. Disconnects on drop.
pub struct SshClient {
    pub session: Session,
}

impl SshClient {
    pub fn connect(host: &Host, policy: HostKeyPolicy, timeout: Duration) -> Result<Self, TransferError> {
        let tcp = connect_tcp(&host.ip, host.port, timeout).map_err(|e| {
            TransferError::ConnectFailed {
                addr: host.addr(),
                source: e,
            }
        })?;

        let mut session = Session::new()?;
        session.set_tcp_stream(tcp);
        limit_blocking_calls(&session, timeout);
        session.handshake()?;

        policy.verify(&session, host)?;

        if let Err(e) = session.userauth_password(&host.user, &host.password) {
            log::debug!("password authentication for {} rejected: {}", host.addr(), e);
        }
        if !session.authenticated() {
            return Err(TransferError::AuthenticationFailed {
                user: host.user.clone(),
            });
        }

        // A slow link must not fail a file copy halfway through.
        lift_blocking_limit(&session);

        Ok(SshClient { session })
    }

    pub fn sftp(&self) -> Result<SftpChannel, TransferError> {
        self.session
            .sftp()
            .map(SftpChannel::new)
            .map_err(|e| TransferError::ChannelFailed {
                message: e.to_string(),
            })
    }
}

impl Drop for SshClient {
    fn drop(&mut self) {
        let _ = self.session.disconnect(None, "transfer finished", None);
    }
}

impl RemoteConnection for SshClient {
    type Channel = SftpChannel;

    fn open_channel(&self) -> Result<SftpChannel, TransferError> {
        self.sftp()
    }
}

fn limit_blocking_calls(session: &Session, timeout: Duration) {
    session.set_timeout(timeout.as_millis().min(u32::MAX as u128) as u32);
}

fn lift_blocking_limit(session: &Session) {
    session.set_timeout(0);
}

fn connect_tcp(ip: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in (ip, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }

    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "address resolved to nothing")
    }))
}

/// Opens real SSH sessions with a fixed timeout and host-key policy.
#[derive(Debug, Clone)]
pub struct Ssh2Connector {
    policy: HostKeyPolicy,
    timeout: Duration,
}

impl Ssh2Connector {
    pub fn new(policy: HostKeyPolicy) -> Self {
        Self {
            policy,
            timeout: CONNECT_TIMEOUT,
        }
    }
}

impl RemoteConnector for Ssh2Connector {
    type Connection = SshClient;

    fn connect(&self, host: &Host) -> Result<SshClient, TransferError> {
        SshClient::connect(host, self.policy, self.timeout)
    }
}
