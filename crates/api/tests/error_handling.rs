//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use todoapp_api::error::AppError;
use todoapp_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn unauthenticated_returns_401() {
    let err = AppError::Core(CoreError::Unauthenticated("Missing bearer token".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHENTICATED");
    assert_eq!(json["error"], "Missing bearer token");
}

#[tokio::test]
async fn forbidden_returns_403() {
    let err = AppError::Core(CoreError::Forbidden("Todo belongs to another user".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn not_found_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Todo",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Todo with id 42 not found");
}

#[tokio::test]
async fn invalid_reference_returns_404_with_own_code() {
    let err = AppError::Core(CoreError::InvalidReference {
        entity: "Category",
        id: 7,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "INVALID_REFERENCE");
    assert_eq!(json["error"], "Category with id 7 does not exist");
}

#[tokio::test]
async fn validation_returns_400() {
    let err = AppError::Core(CoreError::Validation("Content is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Content is required");
}

#[tokio::test]
async fn already_exists_returns_409() {
    let err = AppError::Core(CoreError::AlreadyExists("Username is already taken".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn invalid_credentials_carries_fixed_message() {
    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidCredentials)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "INVALID_CREDENTIALS");
    assert_eq!(json["error"], "Invalid username or password");
}

#[tokio::test]
async fn bad_request_returns_400() {
    let err = AppError::BadRequest("Request body is not valid JSON".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Request body is not valid JSON");
}

#[tokio::test]
async fn payload_too_large_returns_413() {
    let (status, json) = error_to_response(AppError::PayloadTooLarge).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Server-side failures never leak their detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_is_sanitized() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(
        !json.to_string().contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn core_internal_is_sanitized() {
    let err = AppError::Core(CoreError::Internal("token signing key missing".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("signing key"));
}

#[tokio::test]
async fn persistence_failure_is_sanitized() {
    let err = AppError::Core(CoreError::PersistenceFailed("update on todos hit 0 rows".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "PERSISTENCE_FAILED");
    assert_eq!(json["error"], "The change could not be saved");
}

#[tokio::test]
async fn pool_failure_is_internal() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
