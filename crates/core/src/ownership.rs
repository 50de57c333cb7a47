//! The ownership gate shared by every single-record read and every mutation.
//!
//! Loading is the caller's job (it needs the database); this module decides
//! what a loaded-or-missing record means for a given caller:
//!
//! | Loaded record          | Result                      |
//! |------------------------|-----------------------------|
//! | `None`                 | `CoreError::NotFound`       |
//! | owned by someone else  | `CoreError::Forbidden`      |
//! | owned by the caller    | `Ok(record)`                |
//!
//! Soft-deleted rows never reach this function: repositories read through
//! the `visible_*` views, so a deleted row arrives here as `None`.

use crate::error::CoreError;
use crate::types::{DbId, UserId};

/// A record that belongs to exactly one user.
pub trait Owned {
    /// Entity name used in error messages (e.g. `"Todo"`).
    const ENTITY: &'static str;

    /// The id of the owning user. Immutable after creation.
    fn owner_id(&self) -> UserId;
}

/// Decide whether `caller` may access the record loaded for `id`.
pub fn authorize<T: Owned>(record: Option<T>, caller: UserId, id: DbId) -> Result<T, CoreError> {
    let record = record.ok_or(CoreError::NotFound {
        entity: T::ENTITY,
        id,
    })?;

    if record.owner_id() != caller {
        return Err(CoreError::Forbidden(format!(
            "{} {id} belongs to another user",
            T::ENTITY
        )));
    }

    Ok(record)
}
