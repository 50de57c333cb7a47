//! Handlers for the caller's own account (`/users/me`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use todoapp_core::error::CoreError;
use todoapp_db::models::user::{UpdateProfile, UserResponse};
use todoapp_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn account_gone() -> AppError {
    AppError::Core(CoreError::Unauthenticated("Account is no longer active".into()))
}

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let account = UserRepo::find_active_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(account_gone)?;
    Ok(Json(DataResponse {
        data: account.into(),
    }))
}

/// PUT /api/v1/users/me
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(input): ValidJson<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let account = UserRepo::update_profile(&state.pool, user.user_id, &input.full_name)
        .await?
        .ok_or_else(account_gone)?;

    tracing::info!(user_id = %user.user_id, "Profile updated");

    Ok(Json(DataResponse {
        data: account.into(),
    }))
}

/// DELETE /api/v1/users/me
///
/// Deactivates the account. Its todos and categories are kept.
pub async fn deactivate_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<StatusCode> {
    if !UserRepo::deactivate(&state.pool, user.user_id).await? {
        return Err(account_gone());
    }
    tracing::info!(user_id = %user.user_id, "Account deactivated");
    Ok(StatusCode::NO_CONTENT)
}
