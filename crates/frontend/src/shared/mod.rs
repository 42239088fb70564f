pub mod api_utils;
pub mod csv_cache;
pub mod toast;
