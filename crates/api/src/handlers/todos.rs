//! Handlers for the `/todos` resource.
//!
//! Every handler is scoped to the authenticated caller. Single-record reads
//! and all mutations pass through [`load_owned`] first.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use todoapp_core::error::CoreError;
use todoapp_core::priority::Priority;
use todoapp_core::todos::{validate_due_date, validate_due_date_change, TodoView};
use todoapp_core::types::DbId;
use todoapp_core::validation::validate_request;
use todoapp_db::models::todo::{
    CreateTodo, TodoFields, TodoResponse, TodoWrite, ToggleTodo, UpdateTodo,
};
use todoapp_db::repositories::TodoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::load_owned;
use crate::response::DataResponse;
use crate::state::AppState;

type TodoList = Json<DataResponse<Vec<TodoResponse>>>;
type TodoItem = Json<DataResponse<TodoResponse>>;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Todo", id })
}

/// The gate passed but the write hit no visible row.
fn write_failed(id: DbId) -> AppError {
    AppError::Core(CoreError::PersistenceFailed(format!(
        "Todo {id} was not written"
    )))
}

fn invalid_category(category_id: Option<DbId>) -> AppError {
    AppError::Core(CoreError::InvalidReference {
        entity: "Category",
        id: category_id.unwrap_or_default(),
    })
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

async fn list_view(state: &AppState, user: &AuthUser, view: TodoView) -> AppResult<TodoList> {
    let todos = TodoRepo::list_for_owner(&state.pool, user.user_id, view, Utc::now()).await?;
    Ok(Json(DataResponse {
        data: todos.into_iter().map(TodoResponse::from).collect(),
    }))
}

/// GET /api/v1/todos
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<TodoList> {
    list_view(&state, &user, TodoView::All).await
}

/// GET /api/v1/todos/completed
pub async fn list_completed(State(state): State<AppState>, user: AuthUser) -> AppResult<TodoList> {
    list_view(&state, &user, TodoView::Completed).await
}

/// GET /api/v1/todos/pending
pub async fn list_pending(State(state): State<AppState>, user: AuthUser) -> AppResult<TodoList> {
    list_view(&state, &user, TodoView::Pending).await
}

/// GET /api/v1/todos/today
///
/// Todos due within the current UTC calendar day.
pub async fn list_today(State(state): State<AppState>, user: AuthUser) -> AppResult<TodoList> {
    list_view(&state, &user, TodoView::Today).await
}

/// GET /api/v1/todos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<TodoItem> {
    let todo = load_owned(TodoRepo::find_detail_by_id(&state.pool, id), &user, id).await?;
    Ok(Json(DataResponse { data: todo.into() }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/v1/todos
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(input): ValidJson<CreateTodo>,
) -> AppResult<(StatusCode, TodoItem)> {
    let now = Utc::now();
    if let Some(due) = input.due_date {
        validate_due_date(due, now)?;
    }

    let fields = TodoFields {
        priority: Priority::resolve(input.priority, input.due_date, now),
        content: input.content,
        due_date: input.due_date,
        category_id: input.category_id,
    };
    // The category check happens inside the insert's transaction.
    let todo = match TodoRepo::create(&state.pool, user.user_id, &fields).await? {
        TodoWrite::Written(todo) => todo,
        TodoWrite::CategoryUnavailable => return Err(invalid_category(fields.category_id)),
        TodoWrite::NotWritten => {
            return Err(AppError::InternalError("Todo insert returned no row".into()))
        }
    };

    tracing::info!(todo_id = todo.todo.id, user_id = %user.user_id, "Todo created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: todo.into() })))
}

/// PUT /api/v1/todos/{id}
///
/// Replaces content, due date, priority and category. The completed flag is
/// left alone. Without an explicit priority the stored one is kept unless the
/// due date changed, in which case it is derived again.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateTodo>,
) -> AppResult<TodoItem> {
    let current = load_owned(TodoRepo::find_by_id(&state.pool, id), &user, id).await?;

    validate_request(&input)?;
    let now = Utc::now();
    validate_due_date_change(current.due_date, input.due_date, now)?;

    let priority = match input.priority {
        Some(explicit) => explicit,
        None if input.due_date != current.due_date => Priority::resolve(None, input.due_date, now),
        None => current.priority,
    };
    let fields = TodoFields {
        content: input.content,
        due_date: input.due_date,
        priority,
        category_id: input.category_id,
    };

    let todo = match TodoRepo::update(&state.pool, user.user_id, id, &fields).await? {
        TodoWrite::Written(todo) => todo,
        TodoWrite::CategoryUnavailable => return Err(invalid_category(fields.category_id)),
        TodoWrite::NotWritten => return Err(write_failed(id)),
    };

    tracing::info!(todo_id = id, user_id = %user.user_id, "Todo updated");

    Ok(Json(DataResponse { data: todo.into() }))
}

/// PATCH /api/v1/todos/{id}/toggle
///
/// An empty body, a `null` body, or one without `isCompleted` flips the
/// flag; otherwise the flag is set to the given value. The body is only
/// parsed once the caller has passed the ownership gate.
pub async fn toggle(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<TodoItem> {
    load_owned(TodoRepo::find_by_id(&state.pool, id), &user, id).await?;

    let input = parse_toggle(&body)?;

    let written = match input.is_completed {
        Some(target) => TodoRepo::set_completed(&state.pool, id, target).await?,
        None => TodoRepo::toggle_completed(&state.pool, id).await?,
    };
    if !written {
        return Err(write_failed(id));
    }

    // Deleted between the write and this read: report it as gone.
    let todo = TodoRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        todo_id = id,
        user_id = %user.user_id,
        is_completed = todo.todo.is_completed,
        "Todo completion changed"
    );

    Ok(Json(DataResponse { data: todo.into() }))
}

fn parse_toggle(body: &[u8]) -> AppResult<ToggleTodo> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ToggleTodo::default());
    }
    let input: Option<ToggleTodo> =
        serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(input.unwrap_or_default())
}

/// DELETE /api/v1/todos/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(TodoRepo::find_by_id(&state.pool, id), &user, id).await?;

    if !TodoRepo::soft_delete(&state.pool, id).await? {
        return Err(write_failed(id));
    }

    tracing::info!(todo_id = id, user_id = %user.user_id, "Todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
