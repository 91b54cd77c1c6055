// Run summary
use crate::transfer::outcome::TransferOutcome;
use std::fmt::Write as _;

/// Failure counts first, then the captured reason for each failure.
pub fn summarize(outcome: &TransferOutcome) -> String {
    let mut buf = String::new();
    let _ = writeln!(buf, "Failed Hosts: {}", outcome.failed_host_count());
    let _ = writeln!(buf, "Failed Files: {}", outcome.failed_file_count());

    if !outcome.failed_hosts().is_empty() {
        let _ = writeln!(buf, "\nHosts:");
        for host in outcome.failed_hosts() {
            let _ = writeln!(buf, "  {} ({}): {}", host.name, host.addr, host.error);
        }
    }

    if !outcome.failed_files().is_empty() {
        let _ = writeln!(buf, "\nFiles:");
        for (path, error) in outcome.failed_files() {
            let _ = writeln!(buf, "  {}: {}", path, error);
        }
    }

    buf
}
