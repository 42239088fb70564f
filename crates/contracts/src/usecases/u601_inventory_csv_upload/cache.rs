use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::DroppedLine;
use super::review::ReviewTable;

/// Ключ кэша, под которым страница загрузки хранит своё состояние
pub const CACHE_KEY: &str = "u601_inventory_csv";

/// Состояние страницы загрузки, переживающее перезагрузку
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedUpload {
    pub upload_id: String,
    pub file_name: String,
    pub table: ReviewTable,
    #[serde(default)]
    pub dropped: Vec<DroppedLine>,
    #[serde(default)]
    pub not_found: usize,
    pub saved_at: DateTime<Utc>,
}
