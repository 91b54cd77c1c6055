pub mod cli;
pub mod config;
pub mod selection;
pub mod ssh;
pub mod transfer;
pub mod utils;

use selection::SelectionSet;
use ssh::{HostKeyPolicy, Ssh2Connector};
use transfer::{TransferEngine, TransferOptions, TransferOutcome};

/// Sends every selected file to every selected host over SSH/SFTP.
pub fn run_transfer(
    selection: &SelectionSet,
    policy: HostKeyPolicy,
    options: TransferOptions,
) -> TransferOutcome {
    let engine = TransferEngine::new(Ssh2Connector::new(policy), options);
    engine.run(selection)
}
