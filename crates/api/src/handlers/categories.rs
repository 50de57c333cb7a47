//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use todoapp_core::categories::normalize_icon;
use todoapp_core::error::CoreError;
use todoapp_core::types::DbId;
use todoapp_core::validation::validate_request;
use todoapp_db::models::category::{CategoryWithCount, CreateCategory, UpdateCategory};
use todoapp_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::load_owned;
use crate::response::DataResponse;
use crate::state::AppState;

/// The gate passed but the write hit no visible row.
fn write_failed(id: DbId) -> AppError {
    AppError::Core(CoreError::PersistenceFailed(format!(
        "Category {id} was not written"
    )))
}

/// GET /api/v1/categories
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CategoryWithCount>>>> {
    let categories = CategoryRepo::list_for_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CategoryWithCount>>> {
    let category = load_owned(CategoryRepo::find_by_id(&state.pool, id), &user, id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(input): ValidJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<CategoryWithCount>>)> {
    let icon = normalize_icon(input.icon.as_deref());
    let category = CategoryRepo::create(
        &state.pool,
        user.user_id,
        &input.name,
        input.color.as_deref(),
        icon.as_deref(),
    )
    .await?;

    tracing::info!(category_id = category.category.id, user_id = %user.user_id, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateCategory>,
) -> AppResult<Json<DataResponse<CategoryWithCount>>> {
    load_owned(CategoryRepo::find_by_id(&state.pool, id), &user, id).await?;
    validate_request(&input)?;

    let icon = normalize_icon(input.icon.as_deref());
    let category = CategoryRepo::update(&state.pool, id, &input.name, &input.color, icon.as_deref())
        .await?
        .ok_or_else(|| write_failed(id))?;

    tracing::info!(category_id = id, user_id = %user.user_id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Soft-deletes the category and detaches its todos in one transaction.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(CategoryRepo::find_by_id(&state.pool, id), &user, id).await?;

    if !CategoryRepo::soft_delete_and_detach(&state.pool, id).await? {
        return Err(write_failed(id));
    }

    tracing::info!(category_id = id, user_id = %user.user_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
