use serde::{Deserialize, Serialize};

/// Запрос на разбор CSV, переданного текстом (фронтенд читает файл сам)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseCsvRequest {
    pub file_name: String,
    pub content: String,
}
