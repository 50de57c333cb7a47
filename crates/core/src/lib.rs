//! Domain types and rules for the todo service.
//!
//! Nothing in this crate performs I/O. The `db` crate implements
//! [`ownership::Owned`] for its rows, and the `api` crate calls the
//! validation and derivation helpers before touching the database.

pub mod categories;
pub mod error;
pub mod ownership;
pub mod priority;
pub mod todos;
pub mod types;
pub mod users;
pub mod validation;
