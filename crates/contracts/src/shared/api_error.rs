use serde::{Deserialize, Serialize};

/// Тело ответа с ошибкой от backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
