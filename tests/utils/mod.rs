#![allow(dead_code)]

pub mod mock_remote;

use remote_file_sender::selection::{FileEntry, Host};

pub fn host(name: &str, selected: bool) -> Host {
    Host {
        name: name.to_string(),
        ip: format!("{}.example.test", name),
        port: 22,
        user: "deploy".to_string(),
        password: "secret".to_string(),
        selected,
    }
}

pub fn entry(name: &str, src: &str, dest: &str, selected: bool) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        src: src.to_string(),
        dest: dest.to_string(),
        selected,
    }
}
