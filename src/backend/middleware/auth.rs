/**
 * Authentication Extractor
 *
 * Protects REST routes that act on the caller. The bearer token is taken
 * from the Authorization header, verified, and the caller's document is
 * loaded from the store for the handler.
 */

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};

use crate::backend::auth::sessions::resolve_identity;
use crate::backend::error::BackendError;
use crate::backend::store::SharedStore;
use crate::shared::messaging::User;

/// Bearer token of a request, if any
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Axum extractor for the authenticated user's document
///
/// Rejects with 401: "Invalid token" for a missing or bad token, "User not
/// found" when the token is valid but its account no longer exists.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    SharedStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = resolve_identity(bearer_token(parts)).map_err(|e| {
            tracing::warn!("[Auth] Rejected request to {}: {}", parts.uri.path(), e);
            BackendError::from(e)
        })?;

        let store = SharedStore::from_ref(state);
        let user = store.find_by_email(&identity.email).await?.ok_or_else(|| {
            tracing::warn!("[Auth] Token for unknown user {}", identity.email);
            BackendError::handler(StatusCode::UNAUTHORIZED, "User not found")
        })?;

        Ok(AuthUser(user))
    }
}
