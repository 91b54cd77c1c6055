// Command line arguments
use crate::ssh::HostKeyPolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rfs")]
#[command(about = "Pick hosts and files interactively, then send the files to every host over SFTP")]
#[command(version)]
pub struct Cli {
    /// Config file path (falls back to $RFS_CONFIG when the path does not exist)
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// How to treat the SSH host key presented by each server
    #[arg(long, value_enum, default_value_t = HostKeyPolicy::AcceptAny)]
    pub host_key_policy: HostKeyPolicy,

    /// Do not clear the terminal between menu redraws
    #[arg(long)]
    pub no_clear: bool,

    /// Hide per-file progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
