pub mod client;
pub mod types;

pub use client::{InventoryApi, PharmatechClient};
pub use types::{PharmatechError, ProductPresentationRecord};
