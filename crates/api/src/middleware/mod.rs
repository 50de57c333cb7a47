//! Request guards shared by the resource handlers.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a JWT Bearer token.
//! - [`ownership::load_owned`] -- Loads a record and checks it belongs to the caller.

pub mod auth;
pub mod ownership;
