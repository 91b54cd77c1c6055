//! In-memory stand-in for an SSH/SFTP server farm.

use remote_file_sender::selection::Host;
use remote_file_sender::transfer::{RemoteChannel, RemoteConnection, RemoteConnector};
use remote_file_sender::utils::TransferError;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// What one fake host saw during a run.
#[derive(Debug, Clone, Default)]
pub struct RemoteState {
    pub dirs: BTreeSet<String>,
    pub files: BTreeMap<String, Vec<u8>>,
    pub create_attempts: Vec<String>,
    pub channels_opened: usize,
}

#[derive(Clone, Default)]
pub struct MockConnector {
    remotes: Arc<Mutex<HashMap<String, RemoteState>>>,
    connect_attempts: Arc<Mutex<Vec<String>>>,
    unreachable: HashSet<String>,
    channel_failures: HashSet<String>,
    failing_creates: HashSet<String>,
    failing_writes: HashSet<String>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable(mut self, host: &str) -> Self {
        self.unreachable.insert(host.to_string());
        self
    }

    pub fn refuse_channel(mut self, host: &str) -> Self {
        self.channel_failures.insert(host.to_string());
        self
    }

    pub fn fail_create(mut self, remote_path: &str) -> Self {
        self.failing_creates.insert(remote_path.to_string());
        self
    }

    pub fn fail_write(mut self, remote_path: &str) -> Self {
        self.failing_writes.insert(remote_path.to_string());
        self
    }

    pub fn remote(&self, host: &str) -> RemoteState {
        self.remotes
            .lock()
            .unwrap()
            .get(host)
            .cloned()
            .unwrap_or_default()
    }

    pub fn connect_attempts(&self) -> Vec<String> {
        self.connect_attempts.lock().unwrap().clone()
    }
}

impl RemoteConnector for MockConnector {
    type Connection = MockConnection;

    fn connect(&self, host: &Host) -> Result<MockConnection, TransferError> {
        self.connect_attempts.lock().unwrap().push(host.name.clone());

        if self.unreachable.contains(&host.name) {
            return Err(TransferError::ConnectFailed {
                addr: host.addr(),
                source: io::Error::new(io::ErrorKind::TimedOut, "connection timed out"),
            });
        }

        Ok(MockConnection {
            host: host.name.clone(),
            connector: self.clone(),
        })
    }
}

pub struct MockConnection {
    host: String,
    connector: MockConnector,
}

impl RemoteConnection for MockConnection {
    type Channel = MockChannel;

    fn open_channel(&self) -> Result<MockChannel, TransferError> {
        if self.connector.channel_failures.contains(&self.host) {
            return Err(TransferError::ChannelFailed {
                message: "subsystem request failed".to_string(),
            });
        }

        self.connector
            .remotes
            .lock()
            .unwrap()
            .entry(self.host.clone())
            .or_default()
            .channels_opened += 1;

        Ok(MockChannel {
            host: self.host.clone(),
            connector: self.connector.clone(),
        })
    }
}

pub struct MockChannel {
    host: String,
    connector: MockConnector,
}

impl MockChannel {
    fn with_state<T>(&self, f: impl FnOnce(&mut RemoteState) -> T) -> T {
        let mut remotes = self.connector.remotes.lock().unwrap();
        f(remotes.entry(self.host.clone()).or_default())
    }
}

impl RemoteChannel for MockChannel {
    type File = MockFile;

    fn create_dir_all(&self, path: &str) -> Result<(), TransferError> {
        self.with_state(|state| {
            state.dirs.insert(path.to_string());
        });
        Ok(())
    }

    fn create(&self, path: &str) -> Result<MockFile, TransferError> {
        self.with_state(|state| state.create_attempts.push(path.to_string()));

        if self.connector.failing_creates.contains(path) {
            return Err(TransferError::RemoteCreate {
                path: path.to_string(),
                message: "permission denied".to_string(),
            });
        }

        self.with_state(|state| {
            state.files.insert(path.to_string(), Vec::new());
        });

        Ok(MockFile {
            host: self.host.clone(),
            path: path.to_string(),
            fail_writes: self.connector.failing_writes.contains(path),
            remotes: Arc::clone(&self.connector.remotes),
        })
    }
}

pub struct MockFile {
    host: String,
    path: String,
    fail_writes: bool,
    remotes: Arc<Mutex<HashMap<String, RemoteState>>>,
}

impl Write for MockFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "channel closed"));
        }

        let mut remotes = self.remotes.lock().unwrap();
        let state = remotes.entry(self.host.clone()).or_default();
        state
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
