//! The async half of the ownership gate.
//!
//! Every single-record read and every mutation of a todo or category loads
//! its target through [`load_owned`], which hands the result to
//! [`todoapp_core::ownership::authorize`].

use std::future::Future;

use todoapp_core::ownership::{authorize, Owned};
use todoapp_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;

/// Await `load` and return the record only if `caller` owns it.
///
/// A missing or soft-deleted record is `NotFound`; someone else's record is
/// `Forbidden` and its contents are never returned.
///
/// ```ignore
/// let todo = load_owned(TodoRepo::find_by_id(&state.pool, id), &user, id).await?;
/// ```
pub async fn load_owned<T, F>(load: F, caller: &AuthUser, id: DbId) -> AppResult<T>
where
    T: Owned,
    F: Future<Output = Result<Option<T>, sqlx::Error>>,
{
    let record = load.await?;
    authorize(record, caller.user_id, id).map_err(|err| {
        tracing::debug!(
            entity = T::ENTITY,
            id,
            user_id = %caller.user_id,
            error = %err,
            "Ownership gate rejected request"
        );
        err.into()
    })
}
