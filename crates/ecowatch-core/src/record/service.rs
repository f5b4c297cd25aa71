//! Record service trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::{Record, RecordId, RecordPayload};

/// Remote CRUD and search over pollution records.
///
/// CRUD failures are returned to the caller as-is; a missing record is
/// reported as [`EcowatchError::NotFound`](crate::error::EcowatchError::NotFound).
#[async_trait]
pub trait RecordService: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Record>>;

    async fn get_by_id(&self, id: RecordId) -> Result<Record>;

    /// Records whose title, location or kind contains `term`.
    ///
    /// A blank term is the full listing. The default filters `list_all`
    /// client-side.
    async fn search(&self, term: &str) -> Result<Vec<Record>> {
        let term = term.trim();
        if term.is_empty() {
            return self.list_all().await;
        }
        let needle = term.to_lowercase();
        let matches: Vec<Record> = self
            .list_all()
            .await?
            .into_iter()
            .filter(|record| record.matches(&needle))
            .collect();
        tracing::debug!(
            "[RecordService] search '{}': {} result(s)",
            term,
            matches.len()
        );
        Ok(matches)
    }

    async fn create(&self, payload: &RecordPayload) -> Result<Record>;

    async fn update(&self, id: RecordId, payload: &RecordPayload) -> Result<Record>;

    async fn delete(&self, id: RecordId) -> Result<()>;
}
