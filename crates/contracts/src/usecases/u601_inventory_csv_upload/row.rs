use serde::{Deserialize, Serialize};

/// Значение, которое показывается вместо названий, если презентация не найдена
pub const NOT_FOUND_SENTINEL: &str = "No encontrado";

/// Строка CSV после разбора: `uuid,expirationDate,stock`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    /// ID презентации продукта (product presentation) в Pharmatech
    pub uuid: String,
    /// Дата истечения срока годности в исходном виде, без разбора
    pub expiration_date: String,
    /// Остаток. `None`, если в файле не число (строка остаётся, но не проходит проверку)
    pub stock: Option<i64>,
}

/// Результат поиска презентации по `uuid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found {
        product_name: String,
        presentation_name: String,
    },
    NotFound,
    Failed {
        reason: String,
    },
}

/// Строка CSV с названиями продукта и презентации
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRow {
    #[serde(flatten)]
    pub row: CsvRow,
    pub lookup: LookupOutcome,
}

impl EnrichedRow {
    pub fn new(row: CsvRow, lookup: LookupOutcome) -> Self {
        Self { row, lookup }
    }

    pub fn uuid(&self) -> &str {
        &self.row.uuid
    }

    pub fn product_name(&self) -> &str {
        match &self.lookup {
            LookupOutcome::Found { product_name, .. } => product_name,
            _ => NOT_FOUND_SENTINEL,
        }
    }

    pub fn presentation_name(&self) -> &str {
        match &self.lookup {
            LookupOutcome::Found {
                presentation_name, ..
            } => presentation_name,
            _ => NOT_FOUND_SENTINEL,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.lookup, LookupOutcome::Found { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(uuid: &str) -> CsvRow {
        CsvRow {
            uuid: uuid.to_string(),
            expiration_date: "2025-01-01".to_string(),
            stock: Some(10),
        }
    }

    #[test]
    fn test_names_fall_back_to_sentinel() {
        let failed = EnrichedRow::new(
            row("abc-123"),
            LookupOutcome::Failed {
                reason: "timeout".to_string(),
            },
        );
        assert_eq!(failed.product_name(), NOT_FOUND_SENTINEL);
        assert_eq!(failed.presentation_name(), NOT_FOUND_SENTINEL);
        assert!(!failed.is_found());

        let missing = EnrichedRow::new(row("abc-123"), LookupOutcome::NotFound);
        assert_eq!(missing.product_name(), NOT_FOUND_SENTINEL);
    }

    #[test]
    fn test_found_names() {
        let found = EnrichedRow::new(
            row("abc-123"),
            LookupOutcome::Found {
                product_name: "Ibuprofeno".to_string(),
                presentation_name: "400 mg x 20".to_string(),
            },
        );
        assert_eq!(found.product_name(), "Ibuprofeno");
        assert_eq!(found.presentation_name(), "400 mg x 20");
        assert!(found.is_found());
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let value = serde_json::to_value(EnrichedRow::new(row("abc-123"), LookupOutcome::NotFound))
            .unwrap();
        assert_eq!(value["uuid"], "abc-123");
        assert_eq!(value["stock"], 10);
        assert_eq!(value["lookup"]["status"], "not_found");
    }
}
