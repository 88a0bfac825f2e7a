//! Tests for `ApiError` → HTTP response mapping.
//!
//! Each variant must produce the right status code and a JSON body with
//! a human-readable `message`. No HTTP server needed — these call
//! `IntoResponse` directly on `ApiError` values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use trove_api::error::ApiError;

/// Helper: convert an `ApiError` into its status code and parsed JSON body.
async fn error_to_response(err: ApiError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_400() {
    let (status, json) =
        error_to_response(ApiError::Validation("title is required".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "title is required");
}

#[tokio::test]
async fn upload_error_returns_400() {
    let (status, json) = error_to_response(ApiError::Upload("only images are allowed".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "only images are allowed");
}

#[tokio::test]
async fn auth_error_returns_401() {
    let (status, json) =
        error_to_response(ApiError::Auth("invalid email or password".into())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "invalid email or password");
}

#[tokio::test]
async fn forbidden_error_returns_403() {
    let (status, json) =
        error_to_response(ApiError::Forbidden("cannot edit others' posts".into())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "cannot edit others' posts");
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let (status, json) = error_to_response(ApiError::NotFound("post not found".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "post not found");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let (status, json) =
        error_to_response(ApiError::Conflict("email already registered".into())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "email already registered");
}

#[tokio::test]
async fn delivery_error_returns_500_with_generic_message() {
    let (status, json) =
        error_to_response(ApiError::Delivery("SMTP handshake refused".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // The gateway failure detail stays in the log, not the response.
    assert_eq!(json["message"], "failed to send contact message");
}

#[tokio::test]
async fn internal_error_is_redacted() {
    let (status, json) =
        error_to_response(ApiError::Internal(anyhow::anyhow!("db file corrupt at page 7"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "internal server error");
}
