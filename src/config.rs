// Configuration loading
use crate::cli::Cli;
use crate::selection::{FileEntry, Host, SelectionSet};
use crate::utils::error::ConfigError;
use crate::utils::file::PathProbe;
use anyhow::{Context, Result};
use dialoguer::Password;
use serde::Deserialize;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

/// Consulted when the `--config` path does not exist.
pub const CONFIG_ENV: &str = "RFS_CONFIG";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let path = Self::resolve_path(&cli.config, std::env::var_os(CONFIG_ENV))?;
        log::debug!("loading config from {}", path.display());
        let config = Self::load(&path)?;
        log::info!(
            "Loaded {} hosts and {} files from {}",
            config.hosts.len(),
            config.files.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn resolve_path(flag: &Path, env_value: Option<OsString>) -> Result<PathBuf, ConfigError> {
        if flag.as_os_str().is_empty() {
            return Err(ConfigError::MissingPath);
        }

        if PathProbe::exists(flag) {
            return Ok(flag.to_path_buf());
        }

        match env_value {
            Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
            // Let `load` report the path the operator actually asked for.
            _ => Ok(flag.to_path_buf()),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn into_selection(self) -> SelectionSet {
        SelectionSet::new(self.hosts, self.files)
    }
}

/// Asks for the password of every selected host that has none configured.
pub fn prompt_missing_passwords(set: &mut SelectionSet) -> Result<()> {
    for host in set.hosts.iter_mut().filter(|h| h.selected && h.password.is_empty()) {
        host.password = Password::new()
            .with_prompt(format!("Enter password for {}@{} ({})", host.user, host.ip, host.name))
            .allow_empty_password(true)
            .interact()
            .with_context(|| format!("Failed to read password for {}", host.name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_prefers_existing_flag_path() {
        let dir = tempfile::tempdir().unwrap();
        let flag = dir.path().join("config.json");
        fs::write(&flag, "{}").unwrap();

        let resolved = Config::resolve_path(&flag, Some(OsString::from("/elsewhere.json"))).unwrap();
        assert_eq!(resolved, flag);
    }

    #[test]
    fn test_resolve_falls_back_to_env() {
        let dir = tempfile::tempdir().unwrap();
        let flag = dir.path().join("missing.json");

        let resolved = Config::resolve_path(&flag, Some(OsString::from("/etc/rfs.json"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/etc/rfs.json"));

        let resolved = Config::resolve_path(&flag, None).unwrap();
        assert_eq!(resolved, flag);
    }

    #[test]
    fn test_resolve_rejects_empty_flag() {
        let err = Config::resolve_path(Path::new(""), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPath));
    }
}
