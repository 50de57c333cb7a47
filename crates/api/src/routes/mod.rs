pub mod auth;
pub mod categories;
pub mod health;
pub mod todos;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
///
/// /users/me                      profile, update, deactivate
///
/// /todos                         list, create
/// /todos/completed               completed todos
/// /todos/pending                 pending todos
/// /todos/today                   todos due today (UTC)
/// /todos/{id}                    get, update, delete
/// /todos/{id}/toggle             flip or set completion (PATCH)
///
/// /categories                    list, create
/// /categories/{id}               get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/todos", todos::router())
        .nest("/categories", categories::router())
}
