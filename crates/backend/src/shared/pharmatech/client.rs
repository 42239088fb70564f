use async_trait::async_trait;
use contracts::usecases::u601_inventory_csv_upload::BulkUpdatePayload;
use std::time::Duration;

use super::types::{PharmatechError, PresentationListResponse, ProductPresentationRecord};
use crate::shared::config::PharmatechConfig;

/// Операции Pharmatech, нужные загрузке остатков
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Найти презентации по списку ID
    async fn find_presentations(
        &self,
        ids: &[String],
    ) -> Result<Vec<ProductPresentationRecord>, PharmatechError>;

    /// Массовое обновление остатков одним запросом
    async fn bulk_update_inventory(
        &self,
        payload: &BulkUpdatePayload,
        access_token: &str,
    ) -> Result<(), PharmatechError>;
}

/// HTTP-клиент для REST API Pharmatech
pub struct PharmatechClient {
    client: reqwest::Client,
    base_url: String,
}

impl PharmatechClient {
    pub fn new(config: &PharmatechConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn error_from_response(url: &str, response: reqwest::Response) -> PharmatechError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        PharmatechError::Http {
            url: url.to_string(),
            status,
            body,
        }
    }
}

#[async_trait]
impl InventoryApi for PharmatechClient {
    async fn find_presentations(
        &self,
        ids: &[String],
    ) -> Result<Vec<ProductPresentationRecord>, PharmatechError> {
        let url = self.url("/product/presentation");
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("id", id.as_str())).collect();

        tracing::debug!("Pharmatech API: GET {} ids={:?}", url, ids);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| PharmatechError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(&url, response).await);
        }

        let list: PresentationListResponse =
            response
                .json()
                .await
                .map_err(|e| PharmatechError::Decode {
                    url: url.clone(),
                    message: e.to_string(),
                })?;

        Ok(list.results)
    }

    async fn bulk_update_inventory(
        &self,
        payload: &BulkUpdatePayload,
        access_token: &str,
    ) -> Result<(), PharmatechError> {
        let url = self.url("/inventory/bulk");

        tracing::info!(
            "Pharmatech API: POST {} ({} inventories)",
            url,
            payload.inventories.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| PharmatechError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::info!("Pharmatech API response: {} for {}", status, url);

        if !status.is_success() {
            return Err(Self::error_from_response(&url, response).await);
        }

        Ok(())
    }
}
