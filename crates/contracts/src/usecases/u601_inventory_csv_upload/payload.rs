use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::review::{is_row_submittable, ReviewTable};

/// Одна позиция массового обновления остатков
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    pub product_presentation_id: String,
    pub quantity: i64,
    pub expiration_date: DateTime<Utc>,
}

/// Тело запроса массового обновления: `{ inventories: [...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdatePayload {
    pub inventories: Vec<InventoryUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error("no rows selected")]
    NothingSelected,

    #[error("row {index} has no valid quantity")]
    RowNotSubmittable { index: usize },

    #[error("invalid expiration date '{raw}' for {uuid}")]
    InvalidExpirationDate { uuid: String, raw: String },

    #[error("quantity for {product_presentation_id} must be greater than zero")]
    NonPositiveQuantity { product_presentation_id: String },
}

impl BulkUpdatePayload {
    /// Собрать payload из выбранных строк таблицы (порядок таблицы сохраняется)
    pub fn assemble(table: &ReviewTable) -> Result<Self, AssembleError> {
        let mut inventories = Vec::new();

        for (index, row) in table.selected_rows() {
            if !is_row_submittable(row) {
                return Err(AssembleError::RowNotSubmittable { index });
            }
            let quantity = row
                .quantity_value()
                .ok_or(AssembleError::RowNotSubmittable { index })?;

            let raw = &row.row.row.expiration_date;
            let expiration_date =
                parse_expiration_date(raw).ok_or_else(|| AssembleError::InvalidExpirationDate {
                    uuid: row.row.uuid().to_string(),
                    raw: raw.clone(),
                })?;

            inventories.push(InventoryUpdate {
                product_presentation_id: row.row.uuid().to_string(),
                quantity,
                expiration_date,
            });
        }

        if inventories.is_empty() {
            return Err(AssembleError::NothingSelected);
        }

        Ok(Self { inventories })
    }

    /// Проверка payload, пришедшего извне (на сервере перед отправкой в Pharmatech)
    pub fn validate(&self) -> Result<(), AssembleError> {
        if self.inventories.is_empty() {
            return Err(AssembleError::NothingSelected);
        }
        if let Some(item) = self.inventories.iter().find(|i| i.quantity <= 0) {
            return Err(AssembleError::NonPositiveQuantity {
                product_presentation_id: item.product_presentation_id.clone(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inventories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventories.is_empty()
    }
}

/// Разбор даты из CSV.
/// Поддерживаются RFC 3339, `YYYY-MM-DD` (полночь UTC) и `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn parse_expiration_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u601_inventory_csv_upload::row::{CsvRow, EnrichedRow, LookupOutcome};
    use chrono::TimeZone;

    fn table(rows: &[(&str, &str, Option<i64>)]) -> ReviewTable {
        ReviewTable::new(
            rows.iter()
                .map(|(uuid, date, stock)| {
                    EnrichedRow::new(
                        CsvRow {
                            uuid: uuid.to_string(),
                            expiration_date: date.to_string(),
                            stock: *stock,
                        },
                        LookupOutcome::NotFound,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_scenario_single_selected_row() {
        let mut t = table(&[
            ("abc-123", "2025-01-01", Some(10)),
            ("xyz-456", "2025-02-02", Some(0)),
        ]);
        t.set_selected(0, true);

        let payload = BulkUpdatePayload::assemble(&t).unwrap();
        assert_eq!(
            payload,
            BulkUpdatePayload {
                inventories: vec![InventoryUpdate {
                    product_presentation_id: "abc-123".to_string(),
                    quantity: 10,
                    expiration_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                }]
            }
        );
    }

    #[test]
    fn test_keeps_table_order_and_edited_quantity() {
        let mut t = table(&[
            ("a", "2025-01-01", Some(1)),
            ("b", "2025-01-02", Some(2)),
            ("c", "2025-01-03", Some(3)),
        ]);
        t.set_selected(2, true);
        t.set_selected(0, true);
        t.edit_quantity(2, "30");

        let payload = BulkUpdatePayload::assemble(&t).unwrap();
        let ids: Vec<_> = payload
            .inventories
            .iter()
            .map(|i| (i.product_presentation_id.as_str(), i.quantity))
            .collect();
        assert_eq!(ids, vec![("a", 1), ("c", 30)]);
    }

    #[test]
    fn test_rejects_invalid_selection() {
        let t = table(&[("a", "2025-01-01", Some(1))]);
        assert_eq!(
            BulkUpdatePayload::assemble(&t),
            Err(AssembleError::NothingSelected)
        );

        let mut t = table(&[("a", "2025-01-01", Some(1)), ("b", "2025-01-01", None)]);
        t.select_all(true);
        assert_eq!(
            BulkUpdatePayload::assemble(&t),
            Err(AssembleError::RowNotSubmittable { index: 1 })
        );

        let mut t = table(&[("a", "mañana", Some(1))]);
        t.set_selected(0, true);
        assert!(matches!(
            BulkUpdatePayload::assemble(&t),
            Err(AssembleError::InvalidExpirationDate { .. })
        ));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let mut t = table(&[("abc-123", "2025-01-01", Some(10))]);
        t.set_selected(0, true);
        let json = serde_json::to_value(BulkUpdatePayload::assemble(&t).unwrap()).unwrap();
        let item = &json["inventories"][0];
        assert_eq!(item["productPresentationId"], "abc-123");
        assert_eq!(item["quantity"], 10);
        assert_eq!(item["expirationDate"], "2025-01-01T00:00:00Z");
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            BulkUpdatePayload::default().validate(),
            Err(AssembleError::NothingSelected)
        );
        let payload = BulkUpdatePayload {
            inventories: vec![InventoryUpdate {
                product_presentation_id: "a".to_string(),
                quantity: 0,
                expiration_date: Utc::now(),
            }],
        };
        assert!(matches!(
            payload.validate(),
            Err(AssembleError::NonPositiveQuantity { .. })
        ));
    }

    #[test]
    fn test_parse_expiration_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2025, 2, 2, 0, 0, 0).unwrap();
        assert_eq!(parse_expiration_date("2025-02-02"), Some(midnight));
        assert_eq!(parse_expiration_date(" 2025-02-02 "), Some(midnight));
        assert_eq!(
            parse_expiration_date("2025-02-02T03:00:00-03:00"),
            Some(Utc.with_ymd_and_hms(2025, 2, 2, 6, 0, 0).unwrap())
        );
        assert_eq!(
            parse_expiration_date("2025-02-02 10:30:00"),
            Some(Utc.with_ymd_and_hms(2025, 2, 2, 10, 30, 0).unwrap())
        );
        assert_eq!(parse_expiration_date("02/02/2025"), None);
    }
}
