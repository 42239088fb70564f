use axum::{extract::Multipart, http::StatusCode, Json};
use contracts::shared::api_error::ApiErrorBody;
use contracts::usecases::u601_inventory_csv_upload::{
    BulkUpdatePayload, ParseCsvRequest, ParseCsvResponse, SubmitResponse,
};
use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::shared::config::Config;
use crate::shared::pharmatech::PharmatechClient;
use crate::system::auth::BearerToken;
use crate::usecases::u601_inventory_csv_upload::{SubmitError, UploadExecutor};

type ApiError = (StatusCode, Json<ApiErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ApiErrorBody {
            error: message.into(),
        }),
    )
}

// ============================================================================
// UseCase u601: Inventory CSV upload
// ============================================================================

static U601_EXECUTOR: OnceCell<Arc<UploadExecutor>> = OnceCell::new();

/// Создать executor u601 из конфигурации (вызывается при старте)
pub fn init_u601(config: &Config) -> anyhow::Result<()> {
    let client = PharmatechClient::new(&config.pharmatech)?;
    install_u601(Arc::new(UploadExecutor::new(
        Arc::new(client),
        config.enrichment.concurrency,
    )))
}

pub fn install_u601(executor: Arc<UploadExecutor>) -> anyhow::Result<()> {
    U601_EXECUTOR
        .set(executor)
        .map_err(|_| anyhow::anyhow!("u601 executor already initialized"))
}

fn u601_executor() -> Result<&'static Arc<UploadExecutor>, ApiError> {
    U601_EXECUTOR.get().ok_or_else(|| {
        tracing::error!("u601 executor is not initialized");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Service not initialized")
    })
}

/// POST /api/u601/inventory-csv/parse
pub async fn u601_parse_csv(
    Json(request): Json<ParseCsvRequest>,
) -> Result<Json<ParseCsvResponse>, ApiError> {
    let executor = u601_executor()?;
    Ok(Json(
        executor
            .parse_and_enrich(&request.file_name, &request.content)
            .await,
    ))
}

/// POST /api/u601/inventory-csv/upload (multipart, поле `file`)
pub async fn u601_upload_csv(
    mut multipart: Multipart,
) -> Result<Json<ParseCsvResponse>, ApiError> {
    let executor = u601_executor()?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Invalid multipart body: {}", e);
        api_error(StatusCode::BAD_REQUEST, format!("Invalid multipart body: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let content = field.text().await.map_err(|e| {
            tracing::warn!("Failed to read uploaded file '{}': {}", file_name, e);
            api_error(StatusCode::BAD_REQUEST, format!("Failed to read file: {}", e))
        })?;
        return Ok(Json(executor.parse_and_enrich(&file_name, &content).await));
    }

    Err(api_error(StatusCode::BAD_REQUEST, "Missing 'file' field"))
}

/// POST /api/u601/inventory-csv/submit
pub async fn u601_submit(
    token: BearerToken,
    Json(payload): Json<BulkUpdatePayload>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let executor = u601_executor()?;

    tracing::info!(
        "u601 submit by {}: {} inventories",
        token.claims.sub,
        payload.len()
    );

    match executor.submit(payload, &token.token).await {
        Ok(response) => Ok(Json(response)),
        Err(SubmitError::Invalid(e)) => Err(api_error(StatusCode::BAD_REQUEST, e.to_string())),
        Err(SubmitError::Remote(e)) => {
            let status = match e.status() {
                Some(401) => StatusCode::UNAUTHORIZED,
                Some(403) => StatusCode::FORBIDDEN,
                _ => StatusCode::BAD_GATEWAY,
            };
            Err(api_error(status, e.to_string()))
        }
    }
}
