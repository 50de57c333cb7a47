//! Category models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todoapp_core::ownership::Owned;
use todoapp_core::types::{DbId, Timestamp, UserId};
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `visible_categories` view.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: UserId,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// A category together with the live count of its non-deleted todos.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub category: Category,
    pub todo_count: i64,
}

impl Owned for CategoryWithCount {
    const ENTITY: &'static str = "Category";

    fn owner_id(&self) -> UserId {
        self.category.user_id
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a category. `color` falls back to the default swatch.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[validate(custom(function = "todoapp_core::validation::category_name"))]
    pub name: String,
    #[validate(custom(function = "todoapp_core::validation::hex_color"))]
    pub color: Option<String>,
    #[validate(custom(function = "todoapp_core::validation::category_icon"))]
    pub icon: Option<String>,
}

/// DTO for replacing a category's name, color and icon.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(custom(function = "todoapp_core::validation::category_name"))]
    pub name: String,
    #[validate(custom(function = "todoapp_core::validation::hex_color"))]
    pub color: String,
    #[validate(custom(function = "todoapp_core::validation::category_icon"))]
    pub icon: Option<String>,
}
