//! Authentication Middleware
//!
//! Axum middleware for JWT validation. Resolves the bearer token to a live
//! account record on every protected request and injects it into request
//! extensions for downstream handlers.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::server::AppState;

/// Authentication middleware that validates JWT tokens and injects the
/// resolved student
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Gate for protected routes.
    ///
    /// Rejects with `Unauthorized` when the token is absent, malformed,
    /// expired, or its subject no longer resolves to an account.
    pub async fn authenticate(
        State(state): State<AppState>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, ApiError> {
        let token = bearer_token(req.headers()).ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            ApiError::Unauthorized("Invalid token".to_string())
        })?;

        let claims = state.jwt_service.decode_claims(&token).map_err(|e| {
            tracing::warn!("JWT validation failed: {e:#}");
            ApiError::Unauthorized("Invalid token".to_string())
        })?;

        let record = state
            .students
            .find_by_handle(&claims.sub)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        // Handlers see the public view only; the hash stays in the store layer
        req.extensions_mut().insert(record.student);

        Ok(next.run(req).await)
    }
}

/// Extract the token from a `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth_header| auth_header.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(bearer_token(&headers), None);
    }
}
