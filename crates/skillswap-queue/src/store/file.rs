//! File-backed durable store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use skillswap_core::traits::storage::DurableStore;

/// Key/value store persisted as a single JSON document on disk.
///
/// The in-memory map is the source of truth; every mutation rewrites
/// the file. A write failure leaves the in-memory state updated but
/// reports `false`, so callers know durability was not achieved. At
/// the expected volume (tens to low hundreds of entries) rewriting the
/// whole document is acceptable.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store backed by the given path, loading any existing
    /// contents. A missing or unreadable file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = Self::load(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn load(path: &Path) -> HashMap<String, String> {
        match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Corrupt store file; starting empty");
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read store file; starting empty");
                HashMap::new()
            }
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) -> bool {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!(path = %self.path.display(), error = %e, "Failed to create store directory");
                    return false;
                }
            }
        }
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize store contents");
                return false;
            }
        };
        match fs::write(&self.path, raw) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to write store file");
                false
            }
        }
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let existed = entries.remove(key).is_some();
        if existed {
            self.persist(&entries);
        }
        existed
    }
}
