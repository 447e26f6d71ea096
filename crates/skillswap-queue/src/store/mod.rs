//! Durable client storage backends.
//!
//! The backend is selected at runtime based on configuration, matching
//! the environments the subsystem runs in: in-process only, persisted
//! to disk, or no client storage at all.

pub mod file;
pub mod memory;
pub mod noop;

use std::sync::Arc;

use tracing::info;

use skillswap_core::config::storage::StorageConfig;
use skillswap_core::error::AppError;
use skillswap_core::result::AppResult;
use skillswap_core::traits::storage::DurableStore;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use noop::UnavailableStore;

/// Build the configured durable storage backend.
pub fn from_config(config: &StorageConfig) -> AppResult<Arc<dyn DurableStore>> {
    let store: Arc<dyn DurableStore> = match config.backend.as_str() {
        "memory" => {
            info!("Initializing in-memory durable store");
            Arc::new(MemoryStore::new())
        }
        "file" => {
            info!(path = %config.path, "Initializing file-backed durable store");
            Arc::new(FileStore::open(&config.path))
        }
        "none" => {
            info!("Durable storage disabled; queue operations are no-ops");
            Arc::new(UnavailableStore)
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown storage backend: '{other}'. Supported: memory, file, none"
            )));
        }
    };

    Ok(store)
}
