use contracts::usecases::u601_inventory_csv_upload::{
    BulkUpdatePayload, ParseCsvRequest, ParseCsvResponse, SubmitResponse,
};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_base, error_message};

/// Разобрать CSV и обогатить строки данными Pharmatech
pub async fn parse_csv(file_name: String, content: String) -> Result<ParseCsvResponse, String> {
    let request = ParseCsvRequest { file_name, content };

    let response = Request::post(&format!("{}/api/u601/inventory-csv/parse", api_base()))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<ParseCsvResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Отправить массовое обновление остатков
pub async fn submit(
    payload: &BulkUpdatePayload,
    access_token: &str,
) -> Result<SubmitResponse, String> {
    let response = Request::post(&format!("{}/api/u601/inventory-csv/submit", api_base()))
        .header("Authorization", &format!("Bearer {}", access_token))
        .json(payload)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<SubmitResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
