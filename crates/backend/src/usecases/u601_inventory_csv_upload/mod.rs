pub mod enrichment;
pub mod executor;
pub mod parser;

pub use executor::{SubmitError, UploadExecutor};
