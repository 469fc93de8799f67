/*
[INPUT]:  Storage keys and serialized task-list records
[OUTPUT]: Key/value durable storage backends (file directory, in-memory)
[POS]:    Persistence layer - raw record IO beneath the TaskStore
[UPDATE]: When adding storage backends or changing file layout
*/

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Local key/value text storage, one full record per key
pub trait DurableStorage {
    /// Read the record under `key`, `None` when it was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the record under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Move an unreadable record aside so the key starts empty
    ///
    /// Each call picks a fresh `<key>.<n>.corrupt` name so earlier copies are
    /// kept. Returns that name, or `None` when there was nothing to move.
    fn quarantine(&mut self, key: &str) -> Result<Option<String>>;
}

fn quarantine_name(key: &str, n: u32) -> String {
    format!("{key}.{n}.corrupt")
}

/// Directory of `<key>.json` files written atomically
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn quarantine_path(&self, key: &str, n: u32) -> PathBuf {
        self.dir.join(quarantine_name(key, n))
    }

    fn check_key(key: &str) -> Result<()> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StoreError::InvalidPath(format!("unusable storage key {key:?}")));
        }
        Ok(())
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::check_key(key)?;
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        debug!(path = %path.display(), bytes = contents.len(), "record read");
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Self::check_key(key)?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.record_path(key);

        // Atomic write: temp file in the same directory, then rename over the record
        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&path)?;

        debug!(path = %path.display(), bytes = value.len(), "record written");
        Ok(())
    }

    fn quarantine(&mut self, key: &str) -> Result<Option<String>> {
        Self::check_key(key)?;
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let n = (1..)
            .find(|n| !self.quarantine_path(key, *n).exists())
            .unwrap_or(u32::MAX);
        std::fs::rename(&path, self.quarantine_path(key, n))?;
        Ok(Some(quarantine_name(key, n)))
    }
}

/// Process-local storage for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.records.insert(key.into(), value.into());
        self
    }

    /// Make every subsequent write fail, like a full quota
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn record(&self, key: &str) -> Option<&str> {
        self.records.get(key).map(String::as_str)
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is read-only",
            )));
        }
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn quarantine(&mut self, key: &str) -> Result<Option<String>> {
        let Some(value) = self.records.remove(key) else {
            return Ok(None);
        };
        let name = (1..)
            .map(|n| quarantine_name(key, n))
            .find(|name| !self.records.contains_key(name))
            .unwrap_or_else(|| quarantine_name(key, u32::MAX));
        self.records.insert(name.clone(), value);
        Ok(Some(name))
    }
}
