pub mod cache;
pub mod payload;
pub mod request;
pub mod response;
pub mod review;
pub mod row;

pub use cache::{CachedUpload, CACHE_KEY};
pub use payload::{AssembleError, BulkUpdatePayload, InventoryUpdate};
pub use request::ParseCsvRequest;
pub use response::{DroppedLine, ParseCsvResponse, SubmitResponse};
pub use review::{is_row_submittable, ReviewTable, SelectableRow, SubmitBlock};
pub use row::{CsvRow, EnrichedRow, LookupOutcome, NOT_FOUND_SENTINEL};
