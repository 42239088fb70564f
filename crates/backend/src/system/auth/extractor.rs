use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    Json,
};
use contracts::shared::api_error::ApiErrorBody;
use contracts::system::auth::TokenClaims;

use super::jwt::{bearer_from_header, decode_claims};

/// Bearer token of the caller, forwarded to Pharmatech as is
/// Usage in handlers: `async fn handler(token: BearerToken) -> Response`
pub struct BearerToken {
    pub token: String,
    pub claims: TokenClaims,
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiErrorBody>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let reject = |e: super::jwt::CredentialError| {
            tracing::warn!("Rejected request to {}: {}", parts.uri.path(), e);
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiErrorBody {
                    error: e.to_string(),
                }),
            )
        };

        let token = bearer_from_header(header_value).map_err(reject)?;
        let claims = decode_claims(token).map_err(reject)?;

        Ok(BearerToken {
            token: token.to_string(),
            claims,
        })
    }
}
