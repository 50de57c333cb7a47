use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No identity on the request, or the identity is no longer valid.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The caller is authenticated but does not own the target record.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The record does not exist or has been soft-deleted.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A referenced record (e.g. a todo's category) is missing or foreign.
    #[error("Invalid reference: {entity} with id {id}")]
    InvalidReference { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Login failure. Deliberately carries no detail.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// A write affected zero rows or the datastore rejected it.
    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
