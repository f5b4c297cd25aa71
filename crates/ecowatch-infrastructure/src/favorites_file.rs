//! Favorites persisted between CLI runs.

use crate::paths::{EcowatchPaths, ServiceType};
use crate::storage::AtomicJsonFile;
use ecowatch_core::error::{EcowatchError, Result};
use ecowatch_core::favorites::FavoriteEntry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// `favorites.json` in the config directory, in insertion order.
#[derive(Clone)]
pub struct FavoritesFile {
    file: Arc<AtomicJsonFile<Vec<FavoriteEntry>>>,
}

impl FavoritesFile {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = EcowatchPaths::new(base_path).get_path(ServiceType::Favorites)?;
        Ok(Self::at(path))
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Saved entries; a missing file is an empty list.
    pub async fn load(&self) -> Result<Vec<FavoriteEntry>> {
        let file = self.file.clone();
        let entries = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| EcowatchError::internal(format!("Failed to join task: {}", e)))??;
        Ok(entries.unwrap_or_default())
    }

    pub async fn save(&self, entries: &[FavoriteEntry]) -> Result<()> {
        let file = self.file.clone();
        let entries = entries.to_vec();
        tokio::task::spawn_blocking(move || file.save(&entries))
            .await
            .map_err(|e| EcowatchError::internal(format!("Failed to join task: {}", e)))??;
        Ok(())
    }
}
