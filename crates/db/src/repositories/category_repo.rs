//! Repository for the `categories` table.
//!
//! Reads go through `visible_categories`; writes target `categories` and
//! guard on `deleted_at IS NULL`.

use sqlx::{PgConnection, PgPool};
use todoapp_core::categories::DEFAULT_COLOR;
use todoapp_core::types::{DbId, UserId};

use crate::models::category::{Category, CategoryWithCount};

/// Column list for category queries.
const COLUMNS: &str = "id, user_id, name, color, icon, deleted_at, created_at, updated_at";

/// Category columns prefixed with the `c` alias plus the live todo count.
const COLUMNS_WITH_COUNT: &str = "c.id, c.user_id, c.name, c.color, c.icon, c.deleted_at, \
     c.created_at, c.updated_at, \
     (SELECT COUNT(*) FROM visible_todos t WHERE t.category_id = c.id) AS todo_count";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Create a category for `owner`, returning it with a zero todo count.
    ///
    /// `color` defaults to [`DEFAULT_COLOR`] when `None`.
    pub async fn create(
        pool: &PgPool,
        owner: UserId,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> Result<CategoryWithCount, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, color, icon)
             VALUES ($1, $2, COALESCE($3, $4), $5)
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(owner)
            .bind(name)
            .bind(color)
            .bind(DEFAULT_COLOR)
            .bind(icon)
            .fetch_one(pool)
            .await?;
        Ok(CategoryWithCount {
            category,
            todo_count: 0,
        })
    }

    /// Find a visible category by id, regardless of owner.
    ///
    /// Ownership is decided by the caller through the ownership gate.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS_WITH_COUNT} FROM visible_categories c WHERE c.id = $1");
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the visible categories of `owner`, ordered by name.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner: UserId,
    ) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS_WITH_COUNT} FROM visible_categories c
             WHERE c.user_id = $1
             ORDER BY c.name ASC, c.id ASC"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// Replace name, color and icon of a visible category.
    ///
    /// Returns `None` if the category is gone (deleted concurrently).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        color: &str,
        icon: Option<&str>,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                UPDATE categories SET name = $2, color = $3, icon = $4
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING {COLUMNS}
             )
             SELECT {COLUMNS_WITH_COUNT} FROM c"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(id)
            .bind(name)
            .bind(color)
            .bind(icon)
            .fetch_optional(pool)
            .await
    }

    /// Whether `id` is a visible category owned by `owner`.
    ///
    /// Share-locks the row until the caller's transaction ends, so a
    /// concurrent [`soft_delete_and_detach`](Self::soft_delete_and_detach)
    /// cannot slip in before the caller writes a reference to it.
    pub async fn exists_for_owner(
        conn: &mut PgConnection,
        id: DbId,
        owner: UserId,
    ) -> Result<bool, sqlx::Error> {
        let found = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM categories
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
             FOR SHARE",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(conn)
        .await?;
        Ok(found.is_some())
    }

    /// Soft-delete a category and detach every todo that references it.
    ///
    /// Runs in one transaction. The category row is locked `FOR UPDATE`
    /// first, so todo writes that share-lock it either finish before the
    /// detach (and are detached) or wait and then see it deleted. Returns
    /// `false` (and writes nothing) if the category was not visible.
    pub async fn soft_delete_and_detach(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM categories WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        let detached = sqlx::query("UPDATE todos SET category_id = NULL WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("UPDATE categories SET deleted_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(category_id = id, detached, "Category soft-deleted");
        Ok(true)
    }
}
