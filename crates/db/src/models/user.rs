//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todoapp_core::types::{Timestamp, UserId};
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub todo_points: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub todo_points: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            todo_points: user.todo_points,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a new user. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub full_name: String,
    pub password_hash: String,
}

/// DTO for updating the caller's own profile.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    #[validate(custom(function = "todoapp_core::validation::full_name"))]
    pub full_name: String,
}
