//! Route definitions for the `/todos` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::todos;
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /completed     -> list_completed
/// GET    /pending       -> list_pending
/// GET    /today         -> list_today
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// PATCH  /{id}/toggle   -> toggle
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todos::list).post(todos::create))
        .route("/completed", get(todos::list_completed))
        .route("/pending", get(todos::list_pending))
        .route("/today", get(todos::list_today))
        .route(
            "/{id}",
            get(todos::get_by_id)
                .put(todos::update)
                .delete(todos::delete),
        )
        .route("/{id}/toggle", patch(todos::toggle))
}
