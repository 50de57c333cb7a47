//! JSON body extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections.
//!
//! - [`JsonBody`] -- deserialize only. Handlers that must run the ownership
//!   gate before validating use this and call
//!   [`todoapp_core::validation::validate_request`] themselves.
//! - [`ValidJson`] -- deserialize, then run the payload's `validator` rules.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use todoapp_core::validation::validate_request;
use validator::Validate;

use crate::error::AppError;

/// Deserialized JSON body; malformed input becomes [`AppError::BadRequest`]
/// and a body over the size limit [`AppError::PayloadTooLarge`].
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::PayloadTooLarge)
            }
            Err(rejection) => Err(AppError::BadRequest(rejection_message(rejection))),
        }
    }
}

/// Deserialized and validated JSON body.
///
/// Rule violations become `CoreError::Validation` (400 `VALIDATION_ERROR`).
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        validate_request(&value)?;
        Ok(ValidJson(value))
    }
}

fn rejection_message(rejection: JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => err.body_text(),
        JsonRejection::JsonSyntaxError(err) => err.body_text(),
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        JsonRejection::BytesRejection(err) => err.body_text(),
        other => {
            tracing::warn!(rejection = ?other, "Unhandled JSON rejection");
            other.body_text()
        }
    }
}
