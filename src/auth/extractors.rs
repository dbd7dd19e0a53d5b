use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::error::ApiError;

pub const AUTH_HEADER: &str = "x-auth-token";

/// Verified identity of the caller, taken from the `x-auth-token` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match parts.headers.get(AUTH_HEADER) {
            Some(v) if !v.is_empty() => v,
            _ => return Err(ApiError::MissingToken),
        };
        let token = raw.to_str().map_err(|_| ApiError::InvalidToken)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ApiError::InvalidToken
        })?;

        let user = AuthUser(claims.user.id);
        parts.extensions.insert(user);
        Ok(user)
    }
}
