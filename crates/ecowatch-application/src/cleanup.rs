//! Boot-time purge of long-lived token keys.

use ecowatch_core::config::StorageConfig;
use ecowatch_core::session::CredentialStore;
use std::sync::Arc;

/// Removes tokens earlier builds left in long-lived storage.
///
/// The purge is unconditional: a valid-looking token is removed just the
/// same, so a session can only come from the tab-scoped snapshot.
pub struct StorageCleanup {
    store: Arc<dyn CredentialStore>,
    keys: Vec<String>,
}

impl StorageCleanup {
    pub fn new(store: Arc<dyn CredentialStore>, config: &StorageConfig) -> Self {
        Self {
            store,
            keys: config.legacy_token_keys.clone(),
        }
    }

    /// Removes every configured key and returns how many were present.
    ///
    /// Failures are logged and skipped.
    pub async fn purge_legacy_tokens(&self) -> usize {
        let mut removed = 0;
        for key in &self.keys {
            match self.store.remove(key).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!("[StorageCleanup] Failed to remove '{}': {}", key, e),
            }
        }
        if removed > 0 {
            tracing::info!("[StorageCleanup] Purged {} legacy token key(s)", removed);
        }
        removed
    }

    pub async fn has_legacy_tokens(&self) -> bool {
        for key in &self.keys {
            match self.store.get(key).await {
                Ok(Some(_)) => return true,
                Ok(None) => {}
                Err(e) => tracing::warn!("[StorageCleanup] Failed to read '{}': {}", key, e),
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecowatch_infrastructure::InMemoryCredentialStore;

    #[tokio::test]
    async fn test_purge_removes_only_listed_keys() {
        let store = Arc::new(InMemoryCredentialStore::new());
        store.set("auth_token", "old".to_string()).await.unwrap();
        store.set("refresh_token", "older".to_string()).await.unwrap();
        store.set("theme", "dark".to_string()).await.unwrap();

        let cleanup = StorageCleanup::new(store.clone(), &StorageConfig::default());
        assert!(cleanup.has_legacy_tokens().await);

        assert_eq!(cleanup.purge_legacy_tokens().await, 2);

        assert!(!cleanup.has_legacy_tokens().await);
        assert_eq!(store.keys().await.unwrap(), vec!["theme".to_string()]);
    }

    #[tokio::test]
    async fn test_purge_on_empty_store() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let cleanup = StorageCleanup::new(store, &StorageConfig::default());

        assert_eq!(cleanup.purge_legacy_tokens().await, 0);
    }

    #[tokio::test]
    async fn test_configured_keys() {
        let store = Arc::new(InMemoryCredentialStore::new());
        store.set("jwt", "x".to_string()).await.unwrap();
        store.set("token", "y".to_string()).await.unwrap();
        let config = StorageConfig {
            legacy_token_keys: vec!["jwt".to_string()],
        };

        StorageCleanup::new(store.clone(), &config)
            .purge_legacy_tokens()
            .await;

        assert_eq!(store.keys().await.unwrap(), vec!["token".to_string()]);
    }
}
