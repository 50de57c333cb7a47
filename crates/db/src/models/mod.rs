//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` + `Validate` DTOs for inserts and updates
//! - `Serialize` response shapes (camelCase on the wire)

pub mod category;
pub mod todo;
pub mod user;
