pub mod api_error;
pub mod csv_cache;
