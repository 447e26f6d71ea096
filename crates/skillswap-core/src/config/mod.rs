//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. The timing windows (throttle, debounce, poll and sweep
//! intervals) are tunable defaults, not fixed contracts.

pub mod delivery;
pub mod feed;
pub mod logging;
pub mod realtime;
pub mod remote;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::delivery::DeliveryConfig;
use self::feed::FeedConfig;
use self::logging::LoggingConfig;
use self::realtime::RealtimeConfig;
use self::remote::{ApiConfig, RowStoreConfig};
use self::storage::StorageConfig;

use crate::error::AppError;

/// Root configuration for the notification subsystem.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote notification API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Direct row-store (fallback channel) settings.
    #[serde(default)]
    pub store: RowStoreConfig,
    /// Durable client storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Delivery retry and pending-queue settings.
    #[serde(default)]
    pub delivery: DeliveryConfig,
    /// Notification feed cache settings.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Realtime subscription and polling settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            store: RowStoreConfig::default(),
            storage: StorageConfig::default(),
            delivery: DeliveryConfig::default(),
            feed: FeedConfig::default(),
            realtime: RealtimeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific
    /// overlay and environment variables prefixed with `SKILLSWAP__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SKILLSWAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
