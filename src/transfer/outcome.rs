// Per-run failure record
use crate::selection::Host;
use crate::utils::error::TransferError;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct FailedHost {
    pub name: String,
    pub addr: String,
    pub error: TransferError,
}

/// Hosts that could not be reached and files that could not be sent.
///
/// File failures are keyed by local source path, so a file that fails on
/// several hosts is counted once and keeps the most recent reason.
#[derive(Debug, Default)]
pub struct TransferOutcome {
    failed_hosts: Vec<FailedHost>,
    failed_files: BTreeMap<String, TransferError>,
    copied: usize,
}

impl TransferOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_host_failure(&mut self, host: &Host, error: TransferError) {
        self.failed_hosts.push(FailedHost {
            name: host.name.clone(),
            addr: host.addr(),
            error,
        });
    }

    pub fn record_file_failure(&mut self, src: impl Into<String>, error: TransferError) {
        self.failed_files.insert(src.into(), error);
    }

    pub fn record_copied(&mut self) {
        self.copied += 1;
    }

    pub fn failed_hosts(&self) -> &[FailedHost] {
        &self.failed_hosts
    }

    pub fn failed_files(&self) -> &BTreeMap<String, TransferError> {
        &self.failed_files
    }

    pub fn failed_host_count(&self) -> usize {
        self.failed_hosts.len()
    }

    pub fn failed_file_count(&self) -> usize {
        self.failed_files.len()
    }

    /// Successful file copies, counted once per host.
    pub fn copied_count(&self) -> usize {
        self.copied
    }

    pub fn is_success(&self) -> bool {
        self.failed_hosts.is_empty() && self.failed_files.is_empty()
    }
}
