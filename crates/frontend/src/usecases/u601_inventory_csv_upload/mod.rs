pub mod api;
pub mod storage;
pub mod view;

pub use view::InventoryCsvUploadPage;
