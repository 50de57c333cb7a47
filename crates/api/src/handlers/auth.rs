//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use todoapp_core::error::CoreError;
use todoapp_core::types::Timestamp;
use todoapp_core::users::validate_password_confirmation;
use todoapp_db::models::user::CreateUser;
use todoapp_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_dummy, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(custom(function = "todoapp_core::validation::full_name"))]
    pub full_name: String,
    #[validate(custom(function = "todoapp_core::validation::username"))]
    pub username: String,
    #[validate(custom(function = "todoapp_core::validation::password_policy"))]
    pub password: String,
    pub confirm_password: String,
}

/// Response body for a successful registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub username: String,
    pub full_name: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account. Usernames are unique across active and deactivated users.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    validate_password_confirmation(&input.password, &input.confirm_password)?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::AlreadyExists(
            "Username is already taken".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration of the same name trips `uq_users_username` (409).
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            full_name: input.full_name,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: user.username,
            full_name: user.full_name,
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and receive an access token.
/// Unknown user, deactivated user and wrong password are indistinguishable.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .filter(|user| user.is_active);
    let Some(user) = user else {
        // Same Argon2 cost as a wrong password.
        verify_dummy(&input.password);
        return Err(AppError::Core(CoreError::InvalidCredentials));
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    let issued = generate_access_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        access_token: issued.token,
        expires_at: issued.expires_at,
    }))
}
