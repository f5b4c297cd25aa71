//! Application configuration model.
//!
//! Loaded from `config.toml`; every section falls back to its defaults so a
//! partial file is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://apitemplate-latest-ahqi.onrender.com/api";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Keys older builds used to keep tokens in long-lived storage.
pub const LEGACY_TOKEN_KEYS: [&str; 4] = ["auth_token", "token", "access_token", "refresh_token"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API, without trailing slash
    pub base_url: String,
    /// Request timeout. Unset means no client-side timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a keystroke is sent to search
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Long-lived keys purged at every start
    pub legacy_token_keys: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            legacy_token_keys: LEGACY_TOKEN_KEYS.iter().map(|key| key.to_string()).collect(),
        }
    }
}
