//! Repository for the `todos` table.

use sqlx::PgPool;
use todoapp_core::todos::{utc_day_bounds, TodoView};
use todoapp_core::types::{DbId, Timestamp, UserId};

use crate::models::todo::{Todo, TodoDetail, TodoFields, TodoWrite};
use crate::repositories::category_repo::CategoryRepo;

/// Column list for todo queries.
const COLUMNS: &str = "id, user_id, content, is_completed, priority, due_date, category_id, \
                        deleted_at, created_at, updated_at";

/// Todo columns (alias `t`) plus the joined category summary (alias `c`).
const DETAIL_COLUMNS: &str = "t.id, t.user_id, t.content, t.is_completed, t.priority, \
     t.due_date, t.category_id, t.deleted_at, t.created_at, t.updated_at, \
     c.name AS category_name, c.color AS category_color, c.icon AS category_icon, \
     c.created_at AS category_created_at";

/// Join that attaches the visible category to a todo row aliased `t`.
const CATEGORY_JOIN: &str = "LEFT JOIN visible_categories c ON c.id = t.category_id";

/// Provides CRUD operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a pending todo for `owner`, returning it with its category.
    ///
    /// The referenced category is share-locked for the duration of the
    /// insert, so a concurrent [`CategoryRepo::soft_delete_and_detach`]
    /// either runs first (and the insert is refused) or waits and detaches
    /// the new todo.
    ///
    /// [`CategoryRepo::soft_delete_and_detach`]: crate::repositories::CategoryRepo::soft_delete_and_detach
    pub async fn create(
        pool: &PgPool,
        owner: UserId,
        fields: &TodoFields,
    ) -> Result<TodoWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(category_id) = fields.category_id {
            if !CategoryRepo::exists_for_owner(&mut tx, category_id, owner).await? {
                tx.rollback().await?;
                return Ok(TodoWrite::CategoryUnavailable);
            }
        }

        let query = format!(
            "WITH t AS (
                INSERT INTO todos (user_id, content, due_date, priority, category_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {COLUMNS}
             )
             SELECT {DETAIL_COLUMNS} FROM t {CATEGORY_JOIN}"
        );
        let todo = sqlx::query_as::<_, TodoDetail>(&query)
            .bind(owner)
            .bind(&fields.content)
            .bind(fields.due_date)
            .bind(fields.priority.as_i16())
            .bind(fields.category_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(TodoWrite::Written(todo))
    }

    /// Find a visible todo by id, regardless of owner.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visible_todos WHERE id = $1");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a visible todo by id together with its category summary.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TodoDetail>, sqlx::Error> {
        let query =
            format!("SELECT {DETAIL_COLUMNS} FROM visible_todos t {CATEGORY_JOIN} WHERE t.id = $1");
        sqlx::query_as::<_, TodoDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the visible todos of `owner` for a view, newest first.
    ///
    /// [`TodoView::Today`] selects due dates inside the UTC day containing `now`.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner: UserId,
        view: TodoView,
        now: Timestamp,
    ) -> Result<Vec<TodoDetail>, sqlx::Error> {
        let filter = match view {
            TodoView::All => "",
            TodoView::Completed => "AND t.is_completed = true",
            TodoView::Pending => "AND t.is_completed = false",
            TodoView::Today => "AND t.due_date >= $2 AND t.due_date < $3",
        };
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM visible_todos t {CATEGORY_JOIN}
             WHERE t.user_id = $1 {filter}
             ORDER BY t.created_at DESC, t.id DESC"
        );

        let mut q = sqlx::query_as::<_, TodoDetail>(&query).bind(owner);
        if view == TodoView::Today {
            let (start, end) = utc_day_bounds(now);
            q = q.bind(start).bind(end);
        }
        q.fetch_all(pool).await
    }

    /// Replace content, due date, priority and category of a visible todo.
    ///
    /// The completed flag is untouched. The new category must be visible and
    /// owned by `owner`; it is share-locked like in [`TodoRepo::create`].
    pub async fn update(
        pool: &PgPool,
        owner: UserId,
        id: DbId,
        fields: &TodoFields,
    ) -> Result<TodoWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(category_id) = fields.category_id {
            if !CategoryRepo::exists_for_owner(&mut tx, category_id, owner).await? {
                tx.rollback().await?;
                return Ok(TodoWrite::CategoryUnavailable);
            }
        }

        let query = format!(
            "WITH t AS (
                UPDATE todos SET content = $2, due_date = $3, priority = $4, category_id = $5
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING {COLUMNS}
             )
             SELECT {DETAIL_COLUMNS} FROM t {CATEGORY_JOIN}"
        );
        let todo = sqlx::query_as::<_, TodoDetail>(&query)
            .bind(id)
            .bind(&fields.content)
            .bind(fields.due_date)
            .bind(fields.priority.as_i16())
            .bind(fields.category_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(todo.map_or(TodoWrite::NotWritten, TodoWrite::Written))
    }

    /// Set the completed flag. Returns `true` if a visible row was updated.
    pub async fn set_completed(
        pool: &PgPool,
        id: DbId,
        is_completed: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todos SET is_completed = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(is_completed)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the completed flag in a single statement.
    ///
    /// Returns `true` if a visible row was updated.
    pub async fn toggle_completed(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todos SET is_completed = NOT is_completed WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a todo. Returns `true` if a visible row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todos SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
