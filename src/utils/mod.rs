// Shared helpers
pub mod error;
pub mod file;

pub use error::{ConfigError, TransferError};
pub use file::PathProbe;
