//! JSON file key-value store
//!
//! All keys live in one JSON object on disk:
//!
//! ```json
//! { "cadence.queue.state": "{\"baseOrder\":[...],...}" }
//! ```
//!
//! Every write rewrites the whole file through a temp file + rename, so a
//! crash mid-write leaves the previous contents intact.

use crate::error::{Result, StorageError};
use cadence_queue::StateStore;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key-value store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use `path` as the backing file
    ///
    /// The file does not need to exist; it is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `path` as the backing file, creating its parent directory
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read one value
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    /// Write one value, keeping every other key
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries_or_reset();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    /// Delete one value; returns whether it existed
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.read_entries_or_reset();
        let existed = entries.remove(key).is_some();
        if existed {
            self.write_entries(&entries)?;
        }
        Ok(existed)
    }

    /// All keys currently stored
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read_entries()?.into_keys().collect())
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw)
            .map_err(|e| StorageError::malformed(self.path.display().to_string(), e.to_string()))
    }

    /// Existing entries, or an empty map if the file cannot be parsed
    ///
    /// A write must never be blocked by a file that was already unreadable.
    fn read_entries_or_reset(&self) -> BTreeMap<String, String> {
        self.read_entries().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Overwriting unreadable store file");
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), keys = entries.len(), "Wrote store file");
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, key: &str) -> cadence_queue::Result<Option<String>> {
        Ok(self.get(key)?)
    }

    fn save(&mut self, key: &str, value: &str) -> cadence_queue::Result<()> {
        Ok(self.set(key, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::open(dir.path().join("state.json")).unwrap()
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn set_then_get() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn remove_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("a", "1").unwrap();

        assert!(store.remove("a").unwrap());
        assert!(!store.remove("a").unwrap());
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn malformed_file_is_an_error_on_read() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json").unwrap();

        assert!(matches!(
            store.get("a"),
            Err(StorageError::Malformed { .. })
        ));
    }

    #[test]
    fn malformed_file_is_replaced_on_write() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "[1, 2, 3]").unwrap();

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn open_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.json");
        let store = JsonFileStore::open(&path).unwrap();

        store.set("k", "v").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
