pub mod extractor;
pub mod jwt;

pub use extractor::BearerToken;
pub use jwt::CredentialError;
