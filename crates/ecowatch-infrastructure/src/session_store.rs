//! Session snapshot stores.

use async_trait::async_trait;
use ecowatch_core::error::{EcowatchError, Result};
use ecowatch_core::session::{SessionSnapshot, SessionStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::paths::{EcowatchPaths, ServiceType};
use crate::storage::AtomicJsonFile;

/// Keeps the snapshot for the lifetime of the process.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn read(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn write(&self, snapshot: &SessionSnapshot) -> Result<()> {
        *self.snapshot.lock().await = Some(snapshot.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.snapshot.lock().await = None;
        Ok(())
    }
}

/// Persists the snapshot as `session.json` in the runtime directory.
///
/// File I/O runs on the blocking pool.
#[derive(Clone)]
pub struct FileSessionStore {
    file: Arc<AtomicJsonFile<SessionSnapshot>>,
}

impl FileSessionStore {
    /// Uses the default location from [`EcowatchPaths`].
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = EcowatchPaths::new(base_path).get_path(ServiceType::Session)?;
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

    async fn blocking<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&AtomicJsonFile<SessionSnapshot>) -> Result<R> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(file.as_ref()))
            .await
            .map_err(|e| EcowatchError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn read(&self) -> Result<Option<SessionSnapshot>> {
        self.blocking(|file| Ok(file.load()?)).await
    }

    async fn write(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let snapshot = snapshot.clone();
        self.blocking(move |file| Ok(file.save(&snapshot)?)).await
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| Ok(file.remove()?)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecowatch_core::auth::User;
    use tempfile::TempDir;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot::authenticated(
            User {
                id: 1,
                name: "A".to_string(),
                email: "a@b.com".to_string(),
            },
            "tok1",
        )
    }

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let store = InMemorySessionStore::new();
        assert!(store.read().await.unwrap().is_none());

        store.write(&snapshot()).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(snapshot()));

        store.clear().await.unwrap();
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(Some(temp_dir.path())).unwrap();

        store.write(&snapshot()).await.unwrap();
        let restored = store.read().await.unwrap().unwrap();
        assert_eq!(restored, snapshot());

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk["token"], "tok1");
        assert_eq!(on_disk["user"]["email"], "a@b.com");
    }

    #[tokio::test]
    async fn test_file_clear_removes_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(Some(temp_dir.path())).unwrap();

        store.clear().await.unwrap();
        store.write(&snapshot()).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.read().await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_file_corrupt_snapshot_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(Some(temp_dir.path())).unwrap();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();

        let err = store.read().await.unwrap_err();
        assert!(matches!(err, EcowatchError::Serialization { .. }));
    }
}
