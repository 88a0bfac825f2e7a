use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] so every failure path produces a JSON
/// body of the form `{"message": "..."}` with the matching status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or a missing/invalid bearer token.
    #[error("{0}")]
    Auth(String),

    /// Authenticated, but not permitted to touch this resource.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Duplicate resource (registered email).
    #[error("{0}")]
    Conflict(String),

    /// Rejected file upload (type or size).
    #[error("{0}")]
    Upload(String),

    /// The blocking mail-gateway send failed.
    #[error("{0}")]
    Delivery(String),

    /// Anything unexpected. Logged in full, returned redacted.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) | ApiError::Upload(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Delivery(msg) => {
                tracing::error!(error = %msg, "Mail delivery failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to send contact message".to_string(),
                )
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}
