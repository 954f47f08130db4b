//! # JSON File Store
//!
//! All persisted documents live in one JSON object file, keyed by namespace
//! (`ethmission.roles`, `ethmission.events`, `ethmission.attendance`). Every
//! mutation rewrites the whole file through a temp file in the same
//! directory followed by a rename, so readers never observe a torn write.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use ethmission_types::{KeyValueStore, StoreError};
use parking_lot::Mutex;
use tracing::debug;

/// File-backed [`KeyValueStore`].
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`, creating parent directories. The file itself
    /// is created on first save.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError(e.to_string()))?;
        }
        Ok(Self { path, write_lock: Mutex::new(()) })
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError(e.to_string())),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError(e.to_string()))
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let doc = serde_json::to_vec_pretty(entries).map_err(|e| StoreError(e.to_string()))?;

        let dir = self.path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let mut tmp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError(e.to_string()))?;
        tmp.write_all(&doc).map_err(|e| StoreError(e.to_string()))?;
        tmp.persist(&self.path).map_err(|e| StoreError(e.to_string()))?;

        debug!(path = %self.path.display(), keys = entries.len(), "store written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}
