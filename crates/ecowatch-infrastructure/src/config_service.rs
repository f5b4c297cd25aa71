//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` in the config directory. A missing
//! file is created with defaults; `ECOWATCH_API_URL` overrides the API base
//! URL without touching the file.

use ecowatch_core::config::AppConfig;
use ecowatch_core::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::paths::{EcowatchPaths, ServiceType};

pub const API_URL_ENV: &str = "ECOWATCH_API_URL";

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, loaded lazily on first access.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = EcowatchPaths::new(base_path).get_path(ServiceType::Config)?;
        Ok(Self::at(path))
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// An unreadable file falls back to defaults with a warning rather than
    /// preventing startup.
    pub fn get_config(&self) -> AppConfig {
        if let Ok(read_lock) = self.config.read() {
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let mut loaded = self.load_config().unwrap_or_else(|e| {
            tracing::warn!(
                "[ConfigService] Falling back to default config ({}): {}",
                self.path.display(),
                e
            );
            AppConfig::default()
        });
        apply_env_overrides(&mut loaded, std::env::var(API_URL_ENV).ok());

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_config(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            let config = AppConfig::default();
            self.save_config(&config)?;
            tracing::info!("[ConfigService] Created default config at {}", self.path.display());
            return Ok(config);
        }

        let content = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(config)?)?;
        self.invalidate_cache();
        Ok(())
    }
}

fn apply_env_overrides(config: &mut AppConfig, api_url: Option<String>) {
    if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    while config.api.base_url.ends_with('/') {
        config.api.base_url.pop();
    }
}
