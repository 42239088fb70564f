use serde::{Deserialize, Serialize};

/// Claims of the Pharmatech access token.
/// Only the fields this service reads; the token is issued elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user id
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize, // expiration timestamp
    #[serde(default)]
    pub iat: Option<usize>, // issued at
}
