//! Bearer authentication middleware for the item routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::auth::{TokenIssuer, TokenType};
use crate::error::{ApiError, AuthError};

/// Rejects the request with 401 unless it carries a valid access token.
///
/// On success the decoded `Claims` are placed in the request extensions.
pub async fn require_bearer(
    State(tokens): State<Arc<TokenIssuer>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = match extract_bearer(req.headers())
        .and_then(|token| tokens.validate(token, TokenType::Access))
    {
        Ok(claims) => claims,
        Err(err) => {
            debug!("Rejected {} {}: {}", req.method(), req.uri().path(), err);
            return Err(err.into());
        }
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?;

    let header = header.to_str().map_err(|_| AuthError::MissingCredentials)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredentials)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn test_extract_bearer_missing_header() {
        assert!(matches!(
            extract_bearer(&HeaderMap::new()),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_extract_bearer_wrong_scheme() {
        assert!(extract_bearer(&headers("Basic dXNlcjpwYXNz")).is_err());
    }

    #[test]
    fn test_extract_bearer_empty_token() {
        assert!(extract_bearer(&headers("Bearer    ")).is_err());
    }
}
