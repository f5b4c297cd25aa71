//! HTTP implementation of [`RecordService`].

use async_trait::async_trait;
use ecowatch_core::error::{EcowatchError, Result};
use ecowatch_core::record::{Record, RecordId, RecordPayload, RecordService};
use reqwest::Method;

use super::client::ApiClient;

const RECORDS_PATH: &str = "pollution";

/// Record endpoints under `{base}/pollution`.
///
/// Search uses the trait's client-side filter over the full listing; the API
/// has no search endpoint.
#[derive(Debug, Clone)]
pub struct HttpRecordService {
    client: ApiClient,
}

impl HttpRecordService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn item_path(id: RecordId) -> String {
        format!("{}/{}", RECORDS_PATH, id)
    }
}

/// Rewrites the generic 404 into a record-specific one.
fn record_not_found(id: RecordId) -> impl FnOnce(EcowatchError) -> EcowatchError {
    move |err| {
        if err.is_not_found() {
            EcowatchError::not_found("Record", id.to_string())
        } else {
            err
        }
    }
}

#[async_trait]
impl RecordService for HttpRecordService {
    async fn list_all(&self) -> Result<Vec<Record>> {
        let request = self.client.request(Method::GET, RECORDS_PATH).await;
        let records: Vec<Record> = self.client.execute_json(request).await?;
        tracing::debug!("[HttpRecordService] Loaded {} record(s)", records.len());
        Ok(records)
    }

    async fn get_by_id(&self, id: RecordId) -> Result<Record> {
        let request = self.client.request(Method::GET, &Self::item_path(id)).await;
        self.client
            .execute_json(request)
            .await
            .map_err(record_not_found(id))
    }

    async fn create(&self, payload: &RecordPayload) -> Result<Record> {
        payload.validate()?;
        let request = self
            .client
            .request(Method::POST, RECORDS_PATH)
            .await
            .json(payload);
        let record: Record = self.client.execute_json(request).await?;
        tracing::info!("[HttpRecordService] Created record {:?}", record.id);
        Ok(record)
    }

    async fn update(&self, id: RecordId, payload: &RecordPayload) -> Result<Record> {
        payload.validate()?;
        let request = self
            .client
            .request(Method::PUT, &Self::item_path(id))
            .await
            .json(payload);
        self.client
            .execute_json(request)
            .await
            .map_err(record_not_found(id))
    }

    async fn delete(&self, id: RecordId) -> Result<()> {
        let request = self.client.request(Method::DELETE, &Self::item_path(id)).await;
        self.client
            .execute(request)
            .await
            .map_err(record_not_found(id))?;
        tracing::info!("[HttpRecordService] Deleted record {}", id);
        Ok(())
    }
}
