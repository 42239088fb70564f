use contracts::usecases::u601_inventory_csv_upload::{CsvRow, EnrichedRow, LookupOutcome};
use futures::stream::{self, StreamExt};

use crate::shared::pharmatech::InventoryApi;

/// Найти названия продукта и презентации для одной строки.
/// Ошибка поиска не прерывает обработку: она становится `LookupOutcome::Failed`.
pub async fn lookup_row(api: &dyn InventoryApi, row: &CsvRow) -> LookupOutcome {
    match api.find_presentations(std::slice::from_ref(&row.uuid)).await {
        Ok(records) => match records.into_iter().next() {
            Some(record) => LookupOutcome::Found {
                product_name: record.product.name,
                presentation_name: record.presentation.name,
            },
            None => {
                tracing::warn!("Presentation {} not found", row.uuid);
                LookupOutcome::NotFound
            }
        },
        Err(e) => {
            tracing::warn!("Lookup failed for {}: {}", row.uuid, e);
            LookupOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Обогатить строки. Не больше `concurrency` запросов одновременно
/// (1 = строго по одной). Порядок результата совпадает с порядком входа.
pub async fn enrich_rows(
    api: &dyn InventoryApi,
    rows: Vec<CsvRow>,
    concurrency: usize,
) -> Vec<EnrichedRow> {
    let limit = concurrency.max(1);
    tracing::info!("Enriching {} rows (concurrency={})", rows.len(), limit);

    stream::iter(rows)
        .map(|row| async move {
            let lookup = lookup_row(api, &row).await;
            EnrichedRow::new(row, lookup)
        })
        .buffered(limit)
        .collect()
        .await
}
