//! Bridges between the domain validators and the `validator` crate.
//!
//! Request DTOs derive [`Validate`] and point their `custom` rules at the
//! adapters below, so the rules themselves live in one place
//! ([`crate::categories`], [`crate::todos`], [`crate::users`]).

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;
use crate::{categories, todos, users};

/// Run derived validation and flatten any failure into [`CoreError::Validation`].
pub fn validate_request<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Render validation errors as `"field: message"` pairs, sorted by field.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => Some(
                errs.iter()
                    .map(|e| format!("{field}: {}", message_of(e)))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

fn message_of(error: &ValidationError) -> String {
    match &error.message {
        Some(msg) => msg.to_string(),
        None => format!("failed '{}' check", error.code),
    }
}

fn to_field_error(code: &'static str, err: CoreError) -> ValidationError {
    let message = match err {
        CoreError::Validation(msg) => msg,
        other => other.to_string(),
    };
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

// ---------------------------------------------------------------------------
// Adapters for `#[validate(custom(function = ...))]`
// ---------------------------------------------------------------------------

pub fn hex_color(value: &str) -> Result<(), ValidationError> {
    categories::validate_color(value).map_err(|e| to_field_error("hex_color", e))
}

pub fn category_name(value: &str) -> Result<(), ValidationError> {
    categories::validate_name(value).map_err(|e| to_field_error("category_name", e))
}

pub fn category_icon(value: &str) -> Result<(), ValidationError> {
    categories::validate_icon(value).map_err(|e| to_field_error("category_icon", e))
}

pub fn todo_content(value: &str) -> Result<(), ValidationError> {
    todos::validate_content(value).map_err(|e| to_field_error("todo_content", e))
}

pub fn username(value: &str) -> Result<(), ValidationError> {
    users::validate_username(value).map_err(|e| to_field_error("username", e))
}

pub fn full_name(value: &str) -> Result<(), ValidationError> {
    users::validate_full_name(value).map_err(|e| to_field_error("full_name", e))
}

pub fn password_policy(value: &str) -> Result<(), ValidationError> {
    users::validate_password_policy(value).map_err(|e| to_field_error("password_policy", e))
}
