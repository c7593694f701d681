//! # File Store
//!
//! Keeps every key in one JSON object at `~/.voyage/state.json`:
//!
//! ```json
//! { "lastScreen": "crew", "lastSelectedItemId:crew": "Victor Glover" }
//! ```
//!
//! Each write lands in a `.tmp` sibling that is then renamed over the file.
//! A corrupt file reads as an error (so callers see "absent") and is replaced
//! wholesale by the next write.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::fs;
use tokio::sync::Mutex;

use crate::persistence::{StateStore, StoreError};

type Entries = BTreeMap<String, String>;

pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns `~/.voyage/state.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".voyage").join("state.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries, StoreError> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        if json.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&json)
            .map_err(|e| StoreError::Parse(format!("{}: {}", self.path.display(), e)))
    }

    async fn atomic_write(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.load().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = match self.load().await {
            Ok(entries) => entries,
            Err(StoreError::Parse(msg)) => {
                warn!("Replacing unreadable state file: {}", msg);
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.atomic_write(&entries).await?;
        debug!("Saved {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_absent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));
        assert_eq!(store.get("lastScreen").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let store = FileStore::new(&path);
        store.set("lastScreen", "crew").await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_parse_error_then_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = FileStore::new(&path);

        assert!(matches!(store.get("lastScreen").await, Err(StoreError::Parse(_))));

        store.set("lastScreen", "technology").await.unwrap();
        assert_eq!(
            store.get("lastScreen").await.unwrap().as_deref(),
            Some("technology")
        );
    }
}
