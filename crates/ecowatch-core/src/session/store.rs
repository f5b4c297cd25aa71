//! Persistence traits for session credentials.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::SessionSnapshot;

/// Tab-scoped storage for the session snapshot.
///
/// Only the session state machine writes here. Writes are last-write-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the stored snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(snapshot))`: a snapshot was stored
    /// - `Ok(None)`: nothing stored
    /// - `Err(_)`: the medium could not be read or the content is corrupt
    async fn read(&self) -> Result<Option<SessionSnapshot>>;

    async fn write(&self, snapshot: &SessionSnapshot) -> Result<()>;

    /// Removes the stored snapshot. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;
}

/// Long-lived key/value storage that outlives a single session.
///
/// The application never stores credentials here; at boot it purges the
/// token keys older builds left behind.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes a key. Returns whether it was present.
    async fn remove(&self, key: &str) -> Result<bool>;

    async fn keys(&self) -> Result<Vec<String>>;
}
