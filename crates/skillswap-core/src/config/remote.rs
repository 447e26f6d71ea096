//! Remote collaborator endpoint configuration.

use serde::{Deserialize, Serialize};

/// Remote notification API configuration (primary delivery channel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the notification API, e.g. `https://app.example.com`.
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Direct row-store configuration (secondary delivery channel).
///
/// The row store is a hosted table endpoint exposing insert,
/// select-by-filter, and update-by-id over REST, bypassing the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowStoreConfig {
    /// Base URL of the row-store REST endpoint.
    #[serde(default = "default_store_base_url")]
    pub base_url: String,
    /// API key sent with every row-store request.
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for RowStoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_base_url(),
            api_key: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_store_base_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_timeout() -> u64 {
    10
}
