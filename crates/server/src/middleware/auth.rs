//! Authentication extractors.
//!
//! Identity is derived once per request from the `Authorization` header and
//! threaded into handlers as an immutable value; nothing is stored in or
//! mutated on any per-request context.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use parceldock_core::ClientId;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires an authenticated client.
///
/// Rejects the request with 401 if no valid session token is presented.
/// The recovered [`ClientId`] is the scoping key for all storage filters.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(client_id): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, client {client_id}!")
/// }
/// ```
pub struct RequireAuth(pub ClientId);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = presented_token(parts);
        let client_id = state.tokens().require_authenticated(token)?;
        Ok(Self(client_id))
    }
}

/// Extractor that optionally resolves the current client.
///
/// Unlike `RequireAuth`, this never rejects the request: an absent or
/// invalid token is simply `None`. Used where "is someone already logged
/// in" must not abort the request, e.g. the double-login check.
pub struct OptionalAuth(pub Option<ClientId>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = presented_token(parts);
        Ok(Self(state.tokens().try_verify(token)))
    }
}

/// Extractor for the raw presented token, without verifying it.
///
/// Logout wants "was any token presented at all" rather than "is the token
/// valid", so it gets the raw string.
pub struct PresentedToken(pub String);

impl FromRequestParts<AppState> for PresentedToken {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(presented_token(parts).to_owned()))
    }
}

/// Pull the bearer token out of the request's `Authorization` header.
///
/// Returns the empty string when the header is absent or unreadable; the
/// token authority treats empty input as "no token".
fn presented_token(parts: &Parts) -> &str {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map_or("", strip_bearer)
}

/// Accept both `Bearer <token>` and a bare token value.
fn strip_bearer(value: &str) -> &str {
    let value = value.trim();
    value.strip_prefix("Bearer ").unwrap_or(value).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bearer_prefixed() {
        assert_eq!(strip_bearer("Bearer abc.def.ghi"), "abc.def.ghi");
    }

    #[test]
    fn test_strip_bearer_bare_token() {
        assert_eq!(strip_bearer("abc.def.ghi"), "abc.def.ghi");
    }

    #[test]
    fn test_strip_bearer_whitespace() {
        assert_eq!(strip_bearer("  Bearer   abc  "), "abc");
    }

    #[test]
    fn test_strip_bearer_empty() {
        assert_eq!(strip_bearer(""), "");
        assert_eq!(strip_bearer("Bearer "), "");
    }
}
