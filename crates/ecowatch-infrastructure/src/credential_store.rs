//! Long-lived key/value stores.
//!
//! The equivalent of a browser's persistent local storage. Nothing in the
//! application writes credentials here; the stores exist so stale token
//! keys can be found and purged at boot.

use async_trait::async_trait;
use ecowatch_core::error::{EcowatchError, Result};
use ecowatch_core::session::CredentialStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::paths::{EcowatchPaths, ServiceType};
use crate::storage::AtomicJsonFile;

type Entries = BTreeMap<String, String>;

#[derive(Debug, Default, Clone)]
pub struct InMemoryCredentialStore {
    entries: Arc<Mutex<Entries>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries.lock().await.remove(key).is_some())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }
}

/// JSON map persisted as `local_storage.json` in the config directory.
#[derive(Clone)]
pub struct FileCredentialStore {
    file: Arc<AtomicJsonFile<Entries>>,
}

impl FileCredentialStore {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = EcowatchPaths::new(base_path).get_path(ServiceType::LocalStorage)?;
        Ok(Self::at(path))
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    async fn blocking<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&AtomicJsonFile<Entries>) -> Result<R> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(file.as_ref()))
            .await
            .map_err(|e| EcowatchError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |file| Ok(file.load()?.and_then(|mut entries| entries.remove(&key))))
            .await
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.blocking(move |file| {
            file.update(Entries::new(), |entries| {
                entries.insert(key, value);
            })?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let key = key.to_string();
        self.blocking(move |file| {
            // Avoid creating the file just to remove a key from it.
            if file.load()?.is_none() {
                return Ok(false);
            }
            Ok(file.update(Entries::new(), |entries| entries.remove(&key).is_some())?)
        })
        .await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.blocking(|file| {
            Ok(file
                .load()?
                .map(|entries| entries.into_keys().collect())
                .unwrap_or_default())
        })
        .await
    }
}
