use serde::{Deserialize, Serialize};

use super::row::EnrichedRow;

/// Строка файла, отброшенная при разборе
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedLine {
    /// Номер строки в файле, начиная с 1 (заголовок = 1)
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

/// Ответ на разбор и обогащение CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseCsvResponse {
    pub upload_id: String,
    pub file_name: String,
    pub rows: Vec<EnrichedRow>,
    pub dropped: Vec<DroppedLine>,
    /// Сколько строк не удалось найти в Pharmatech
    pub not_found: usize,
}

/// Ответ на отправку массового обновления
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub submitted: usize,
    pub message: String,
}
