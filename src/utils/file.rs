// Local path checks
use std::fs;
use std::path::Path;

/// Metadata-only questions about a local path. A missing path is a plain
/// `false`, never an error.
pub struct PathProbe;

impl PathProbe {
    pub fn exists<P: AsRef<Path>>(path: P) -> bool {
        fs::metadata(path).is_ok()
    }

    /// Regular files only; directories and special files answer `false`.
    pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
        fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
        fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_neither_file_nor_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(!PathProbe::exists(&missing));
        assert!(!PathProbe::is_file(&missing));
        assert!(!PathProbe::is_dir(&missing));
    }

    #[test]
    fn test_file_and_dir_are_distinguished() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"a").unwrap();

        assert!(PathProbe::exists(&file));
        assert!(PathProbe::is_file(&file));
        assert!(!PathProbe::is_dir(&file));

        assert!(PathProbe::exists(dir.path()));
        assert!(PathProbe::is_dir(dir.path()));
        assert!(!PathProbe::is_file(dir.path()));
    }
}
