pub mod auth;
pub mod categories;
pub mod todos;
pub mod users;
