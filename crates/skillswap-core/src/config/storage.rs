//! Durable client storage configuration.

use serde::{Deserialize, Serialize};

/// Durable client storage backend configuration.
///
/// `"memory"` keeps everything in-process (lost on restart), `"file"`
/// persists a JSON document to disk, `"none"` models an environment
/// without client storage — every queue operation becomes a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend type: `"memory"`, `"file"`, or `"none"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Path to the backing file when the backend is `"file"`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_path(),
        }
    }
}

fn default_backend() -> String {
    "file".to_string()
}

fn default_path() -> String {
    "data/notify-store.json".to_string()
}
