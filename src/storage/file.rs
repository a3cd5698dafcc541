//! File-backed store: one file per key

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::StoreResult;

/// Extension for slot files
const SLOT_EXT: &str = "json";

/// Stores each slot as `<escaped key>.json` under a data directory.
///
/// Writes land in a `.tmp` sibling first and are renamed into place, so a
/// slot is either the old value or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a data directory
    pub fn open<P: AsRef<Path>>(dir: P) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        log::debug!("File store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", escape_key(key), SLOT_EXT))
    }
}

/// Escape bytes outside `[A-Za-z0-9._-]` as `%XX`
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.slot_path(key);
        let temp_path = path.with_extension("tmp");
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(value.as_bytes())?;
        writer.flush()?;
        writer.get_mut().sync_all()?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_escape_key() {
        assert_eq!(escape_key("ui_notes:todo"), "ui_notes%3Atodo");
        assert_eq!(escape_key("a/b c"), "a%2Fb%20c");
        assert_eq!(escape_key("plain-key.1"), "plain-key.1");
    }

    #[test]
    fn test_write_read_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        assert_eq!(store.read("ui_notes:counter").unwrap(), None);
        store.write("ui_notes:counter", "5").unwrap();
        assert_eq!(store.read("ui_notes:counter").unwrap().as_deref(), Some("5"));
        assert!(store.slot_path("ui_notes:counter").exists());

        store.write("ui_notes:counter", "6").unwrap();
        assert_eq!(store.read("ui_notes:counter").unwrap().as_deref(), Some("6"));
        assert!(!store.slot_path("ui_notes:counter").with_extension("tmp").exists());

        store.remove("ui_notes:counter").unwrap();
        assert_eq!(store.read("ui_notes:counter").unwrap(), None);
        store.remove("ui_notes:counter").unwrap();
    }

    #[test]
    fn test_open_creates_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().join("gone")).unwrap();
        fs::remove_dir(store.dir()).unwrap();
        assert!(store.write("k", "1").is_err());
    }
}
