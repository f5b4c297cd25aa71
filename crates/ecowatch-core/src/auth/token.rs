//! Shared bearer token cell.

use std::sync::Arc;
use tokio::sync::RwLock;

/// The credential token attached to authenticated requests.
///
/// Cloning shares the same cell: the session state machine writes it on every
/// transition and HTTP collaborators read it per request.
#[derive(Debug, Clone, Default)]
pub struct BearerToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl BearerToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<String> {
        self.inner.read().await.clone()
    }

    pub async fn set(&self, token: Option<String>) {
        *self.inner.write().await = token;
    }

    pub async fn clear(&self) {
        self.set(None).await;
    }
}
