//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument. `CategoryRepo::exists_for_owner`
//! takes a connection instead so it can join the caller's transaction.

pub mod category_repo;
pub mod todo_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use todo_repo::TodoRepo;
pub use user_repo::UserRepo;
