use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки обращения к API Pharmatech
#[derive(Debug, Error)]
pub enum PharmatechError {
    #[error("Network error calling {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} from {url}: {body}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl PharmatechError {
    pub fn status(&self) -> Option<u16> {
        match self {
            PharmatechError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Название связанной сущности (продукт, презентация)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

/// Презентация продукта из `GET /product/presentation`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPresentationRecord {
    pub id: String,
    pub product: NamedRef,
    pub presentation: NamedRef,
}

/// Постраничный ответ списка презентаций
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationListResponse {
    #[serde(default)]
    pub results: Vec<ProductPresentationRecord>,
    #[serde(default)]
    pub count: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_decodes() {
        let json = r#"{
            "results": [
                {
                    "id": "abc-123",
                    "product": { "name": "Ibuprofeno", "genericName": "ibuprofen" },
                    "presentation": { "name": "400 mg x 20" },
                    "price": 1200
                }
            ],
            "count": 1
        }"#;
        let response: PresentationListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].product.name, "Ibuprofeno");
        assert_eq!(response.count, Some(1));

        let empty: PresentationListResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.results.is_empty());
    }
}
