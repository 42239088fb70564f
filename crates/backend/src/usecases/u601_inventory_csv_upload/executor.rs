use contracts::usecases::u601_inventory_csv_upload::{
    AssembleError, BulkUpdatePayload, ParseCsvResponse, SubmitResponse,
};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::{enrichment::enrich_rows, parser::parse_inventory_csv};
use crate::shared::pharmatech::{InventoryApi, PharmatechError};

/// Ошибка отправки массового обновления
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Invalid payload: {0}")]
    Invalid(#[from] AssembleError),

    #[error("Pharmatech rejected the update: {0}")]
    Remote(#[from] PharmatechError),
}

/// Executor для UseCase загрузки остатков из CSV
pub struct UploadExecutor {
    api: Arc<dyn InventoryApi>,
    concurrency: usize,
}

impl UploadExecutor {
    pub fn new(api: Arc<dyn InventoryApi>, concurrency: usize) -> Self {
        Self { api, concurrency }
    }

    /// Разобрать файл и найти названия для каждой строки
    pub async fn parse_and_enrich(&self, file_name: &str, content: &str) -> ParseCsvResponse {
        let upload_id = Uuid::new_v4().to_string();
        tracing::info!(
            "u601 upload {}: '{}' ({} bytes)",
            upload_id,
            file_name,
            content.len()
        );

        let parsed = parse_inventory_csv(content);
        let rows = enrich_rows(self.api.as_ref(), parsed.rows, self.concurrency).await;
        let not_found = rows.iter().filter(|r| !r.is_found()).count();

        tracing::info!(
            "u601 upload {}: {} rows, {} not found, {} dropped",
            upload_id,
            rows.len(),
            not_found,
            parsed.dropped.len()
        );

        ParseCsvResponse {
            upload_id,
            file_name: file_name.to_string(),
            rows,
            dropped: parsed.dropped,
            not_found,
        }
    }

    /// Отправить массовое обновление одним запросом.
    /// Частичный успех не различается: либо всё, либо ошибка.
    pub async fn submit(
        &self,
        payload: BulkUpdatePayload,
        access_token: &str,
    ) -> Result<SubmitResponse, SubmitError> {
        payload.validate()?;

        let submitted = payload.len();
        self.api
            .bulk_update_inventory(&payload, access_token)
            .await
            .inspect_err(|e| tracing::error!("u601 bulk update failed: {}", e))?;

        tracing::info!("u601 bulk update accepted: {} inventories", submitted);

        Ok(SubmitResponse {
            submitted,
            message: format!("{} inventario(s) actualizado(s)", submitted),
        })
    }
}
