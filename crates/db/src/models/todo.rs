//! Todo models and DTOs.
//!
//! Rows are read from the `visible_todos` view. [`TodoDetail`] adds the
//! summary of the todo's category (if any) via a left join against
//! `visible_categories`, and [`TodoResponse`] is the wire shape built from it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todoapp_core::ownership::Owned;
use todoapp_core::priority::Priority;
use todoapp_core::todos::deserialize_due_date;
use todoapp_core::types::{DbId, Timestamp, UserId};
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `visible_todos` view.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Todo {
    pub id: DbId,
    pub user_id: UserId,
    pub content: String,
    pub is_completed: bool,
    #[sqlx(try_from = "i16")]
    pub priority: Priority,
    pub due_date: Option<Timestamp>,
    pub category_id: Option<DbId>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Todo {
    const ENTITY: &'static str = "Todo";

    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// A todo joined with its (visible) category.
///
/// The `category_*` columns are all `NULL` when the todo has no category.
#[derive(Debug, Clone, FromRow)]
pub struct TodoDetail {
    #[sqlx(flatten)]
    pub todo: Todo,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub category_icon: Option<String>,
    pub category_created_at: Option<Timestamp>,
}

impl Owned for TodoDetail {
    const ENTITY: &'static str = "Todo";

    fn owner_id(&self) -> UserId {
        self.todo.user_id
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Category fields embedded in a todo response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: DbId,
    pub content: String,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub due_date: Option<Timestamp>,
    pub priority: Priority,
    pub category_id: Option<DbId>,
    pub category: Option<CategorySummary>,
}

impl From<TodoDetail> for TodoResponse {
    fn from(detail: TodoDetail) -> Self {
        let todo = detail.todo;
        let category = match (
            todo.category_id,
            detail.category_name,
            detail.category_color,
            detail.category_created_at,
        ) {
            (Some(id), Some(name), Some(color), Some(created_at)) => Some(CategorySummary {
                id,
                name,
                color,
                icon: detail.category_icon,
                created_at,
            }),
            _ => None,
        };

        Self {
            id: todo.id,
            content: todo.content,
            is_completed: todo.is_completed,
            created_at: todo.created_at,
            due_date: todo.due_date,
            priority: todo.priority,
            category_id: todo.category_id,
            category,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for creating a todo.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    #[validate(custom(function = "todoapp_core::validation::todo_content"))]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub category_id: Option<DbId>,
}

/// Request body for replacing a todo's editable fields.
///
/// Omitted `dueDate` / `categoryId` clear the stored value. An omitted
/// `priority` keeps the stored one unless the due date changed.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[validate(custom(function = "todoapp_core::validation::todo_content"))]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub category_id: Option<DbId>,
}

/// Optional body of the toggle endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTodo {
    pub is_completed: Option<bool>,
}

/// Outcome of [`crate::repositories::TodoRepo::create`] and
/// [`crate::repositories::TodoRepo::update`].
#[derive(Debug, Clone)]
pub enum TodoWrite {
    Written(TodoDetail),
    /// The referenced category is missing, deleted or someone else's.
    CategoryUnavailable,
    /// No visible todo matched (update only).
    NotWritten,
}

/// Values written by [`crate::repositories::TodoRepo::create`] and
/// [`crate::repositories::TodoRepo::update`] after the rules have run.
#[derive(Debug, Clone)]
pub struct TodoFields {
    pub content: String,
    pub due_date: Option<Timestamp>,
    pub priority: Priority,
    pub category_id: Option<DbId>,
}
