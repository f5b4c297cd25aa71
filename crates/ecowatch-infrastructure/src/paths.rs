//! Unified path management for Ecowatch files.
//!
//! ```text
//! ~/.config/ecowatch/            # Config directory
//! ├── config.toml                # Application configuration
//! ├── favorites.json             # Favorites kept by the CLI
//! └── local_storage.json         # Long-lived key/value store (purged of tokens at boot)
//!
//! $XDG_RUNTIME_DIR/ecowatch/     # Runtime directory, emptied when the user logs out
//! └── session.json               # Session snapshot
//! ```
//!
//! The runtime directory plays the part a browser tab's storage plays for
//! the web client: it does not survive the user's login session. Platforms
//! without one fall back to the system temp directory.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "ecowatch";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for ecowatch_core::EcowatchError {
    fn from(e: PathError) -> Self {
        ecowatch_core::EcowatchError::config(e.to_string())
    }
}

/// Types of files managed by Ecowatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Favorites,
    LocalStorage,
    Session,
}

/// Resolves every Ecowatch file location.
///
/// A base path overrides both the config and runtime roots, which keeps
/// tests inside a temporary directory.
#[derive(Debug, Clone, Default)]
pub struct EcowatchPaths {
    base_path: Option<PathBuf>,
}

impl EcowatchPaths {
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            base_path: base_path.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_path {
            return Ok(base.join("config"));
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn runtime_dir(&self) -> PathBuf {
        if let Some(base) = &self.base_path {
            return base.join("runtime");
        }
        dirs::runtime_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR)
    }

    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        Ok(match service {
            ServiceType::Config => self.config_dir()?.join("config.toml"),
            ServiceType::Favorites => self.config_dir()?.join("favorites.json"),
            ServiceType::LocalStorage => self.config_dir()?.join("local_storage.json"),
            ServiceType::Session => self.runtime_dir().join("session.json"),
        })
    }
}
