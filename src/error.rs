//! Error types for the inventory API
//!
//! Provides unified error handling using thiserror. Each layer has its own
//! error enum; `ApiError` is the one handlers return and the only one that
//! knows about HTTP status codes.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Field Errors ==
/// Per-field validation messages, serialized as `{"field": ["message", ...]}`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Appends a message to the error list of a field.
pub fn push_field_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

// == Cache Error Enum ==
/// Errors raised by the cache layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not present in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key was present but its TTL has elapsed
    #[error("Key expired: {0}")]
    Expired(String),

    /// Key or value violates the cache size limits
    #[error("Invalid cache entry: {0}")]
    InvalidEntry(String),
}

// == Store Error Enum ==
/// Errors raised by the relational store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique column constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed at startup
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

// == Auth Error Enum ==
/// Errors raised while issuing or validating credentials.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication credentials were not provided")]
    MissingCredentials,

    #[error("No active account found with the given credentials")]
    InvalidCredentials,

    #[error("Token is invalid or expired")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token has wrong type")]
    WrongTokenType,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// == API Error Enum ==
/// Error type returned by every HTTP handler.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid bearer credential
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource id does not resolve in the store
    #[error("{0}")]
    NotFound(String),

    /// Field-level validation failures
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    /// Request body could not be parsed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Store, cache or serialization failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The generic not-found error used for items.
    pub fn item_not_found() -> Self {
        ApiError::NotFound("Item not found".to_string())
    }
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("Serialization failed: {}", err))
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Store(_) => {
                ApiError::Internal(err.to_string())
            }
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(errors) => {
                return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers and the item service.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = ApiError::item_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Item not found");
    }

    #[tokio::test]
    async fn test_validation_response_lists_fields() {
        let mut errors = FieldErrors::new();
        push_field_error(&mut errors, "name", "This field may not be blank.");
        push_field_error(&mut errors, "quantity", "Ensure this value is greater than or equal to 0.");

        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["name"][0], "This field may not be blank.");
        assert!(json["quantity"].is_array());
    }

    #[tokio::test]
    async fn test_internal_response_hides_detail() {
        let response = ApiError::Internal("disk on fire".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal server error");
    }

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::MissingCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::Hashing("boom".to_string())),
            ApiError::Internal(_)
        ));
    }
}
