use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use super::handlers;
use crate::system::middleware::request_logger::request_logger;

pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // U601 Inventory CSV upload
        // Размер файла не ограничиваем
        .route(
            "/api/u601/inventory-csv/parse",
            post(handlers::usecases::u601_parse_csv).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/api/u601/inventory-csv/upload",
            post(handlers::usecases::u601_upload_csv).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/api/u601/inventory-csv/submit",
            post(handlers::usecases::u601_submit),
        )
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use crate::shared::pharmatech::{InventoryApi, PharmatechError, ProductPresentationRecord};
    use crate::usecases::u601_inventory_csv_upload::UploadExecutor;
    use async_trait::async_trait;
    use contracts::usecases::u601_inventory_csv_upload::{BulkUpdatePayload, ParseCsvRequest};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn submit_request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/u601/inventory-csv/submit")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder
            .body(Body::from(r#"{"inventories":[]}"#))
            .unwrap()
    }

    struct EmptyCatalog;

    #[async_trait]
    impl InventoryApi for EmptyCatalog {
        async fn find_presentations(
            &self,
            _ids: &[String],
        ) -> Result<Vec<ProductPresentationRecord>, PharmatechError> {
            Ok(Vec::new())
        }

        async fn bulk_update_inventory(
            &self,
            _payload: &BulkUpdatePayload,
            _access_token: &str,
        ) -> Result<(), PharmatechError> {
            Ok(())
        }
    }

    fn ensure_executor() {
        // executor глобальный: первый тест ставит, остальные переиспользуют
        let _ = handlers::usecases::install_u601(Arc::new(UploadExecutor::new(
            Arc::new(EmptyCatalog),
            1,
        )));
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_submit_without_token_is_rejected_locally() {
        let response = router().oneshot(submit_request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_submit_with_garbage_token_is_rejected() {
        let response = router()
            .oneshot(submit_request(Some("Bearer not-a-jwt")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_parse_accepts_files_above_default_body_limit() {
        ensure_executor();

        // ~3 MB, больше 2 MB по умолчанию у axum
        let content = format!("{}\nabc-123,2025-01-01,10\n", "h".repeat(3 * 1024 * 1024));
        let body = serde_json::to_vec(&ParseCsvRequest {
            file_name: "big.csv".to_string(),
            content,
        })
        .unwrap();

        let response = router()
            .oneshot(
                Request::post("/api/u601/inventory-csv/parse")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_no_server_side_csv_cache() {
        for method in ["GET", "PUT", "DELETE"] {
            let response = router()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/api/csv-cache/u601_inventory_csv")
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(r#"{"rows":[1,2,3]}"#))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert!(
                response.status().is_client_error(),
                "{} /api/csv-cache -> {}",
                method,
                response.status()
            );
        }
    }
}
