// Selection model: configured hosts and files with their selected flags
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fmt::Write as _;

pub const UI_LINE: &str = "--------------------------------------------------\n";

const DEFAULT_SSH_PORT: u16 = 22;

#[derive(Clone, Deserialize)]
pub struct Host {
    pub name: String,
    pub ip: String,
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(skip)]
    pub selected: bool,
}

impl Host {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("name", &self.name)
            .field("ip", &self.ip)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("selected", &self.selected)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub src: String,
    pub dest: String,
    #[serde(skip)]
    pub selected: bool,
}

fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

// Older config files quote the port ("22"), newer ones use a number.
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port: {:?}", text))),
    }
}

/// Which of the two sequences an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Hosts,
    Files,
}

/// The ordered hosts and files of one run. Order is the addressing scheme the
/// operator uses, so entries are never reordered.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    pub hosts: Vec<Host>,
    pub files: Vec<FileEntry>,
}

impl SelectionSet {
    pub fn new(hosts: Vec<Host>, files: Vec<FileEntry>) -> Self {
        Self { hosts, files }
    }

    pub fn len(&self, stage: Stage) -> usize {
        match stage {
            Stage::Hosts => self.hosts.len(),
            Stage::Files => self.files.len(),
        }
    }

    pub fn is_selected(&self, stage: Stage, index: usize) -> bool {
        match stage {
            Stage::Hosts => self.hosts[index].selected,
            Stage::Files => self.files[index].selected,
        }
    }

    /// Flips the flag at a 0-based index. The caller validates the range.
    pub fn toggle(&mut self, stage: Stage, index: usize) {
        let flag = match stage {
            Stage::Hosts => &mut self.hosts[index].selected,
            Stage::Files => &mut self.files[index].selected,
        };
        *flag = !*flag;
    }

    pub fn selected_hosts(&self) -> impl Iterator<Item = &Host> {
        self.hosts.iter().filter(|h| h.selected)
    }

    pub fn selected_files(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.iter().filter(|f| f.selected)
    }

    pub fn render(&self, stage: Stage) -> String {
        match stage {
            Stage::Hosts => self.render_hosts(),
            Stage::Files => self.render_files(),
        }
    }

    fn render_hosts(&self) -> String {
        let mut buf = String::new();
        let _ = writeln!(buf, "  1. Select Hosts");
        buf.push_str(UI_LINE);
        let _ = writeln!(buf, "{:>3}  {:>3} {:<25} {:<15}", "*", "No.", "Name", "IP");
        buf.push_str(UI_LINE);

        for (i, host) in self.hosts.iter().enumerate() {
            let _ = writeln!(
                buf,
                "{:>3} [{:>2}] {:<25} {:>15}",
                marker(host.selected),
                i + 1,
                host.name,
                host.ip
            );
        }

        buf.push('\n');
        buf
    }

    fn render_files(&self) -> String {
        let mut buf = String::new();
        let _ = writeln!(buf, "  2. Select Files");
        buf.push_str(UI_LINE);
        let _ = writeln!(buf, "{:>3}  {:>3}  {:<20} Source File Path", "*", "No.", "Name");
        let _ = writeln!(buf, "{:>3}  {:>3}  {:<20} Destination File Path", "", "", "");
        buf.push_str(UI_LINE);

        for (i, file) in self.files.iter().enumerate() {
            let _ = writeln!(
                buf,
                "  {:>1} [{:>2}]  {:<20} {}",
                marker(file.selected),
                i + 1,
                file.name,
                file.src
            );
            let _ = writeln!(buf, "  {:>1}  {:>2}   {:<20} {}\n", "", "", "", file.dest);
        }

        buf.push('\n');
        buf
    }
}

fn marker(selected: bool) -> &'static str {
    if selected {
        "*"
    } else {
        ""
    }
}
