use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{StoreResult, TodoStore};
use crate::routes::todos::model::{NewTodo, Todo, TodoId};
use crate::routes::todos::validation::TodoChanges;

const CREATE_TODOS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    body TEXT NOT NULL CHECK (body <> ''),
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// `todos` table in Postgres.
#[derive(Debug, Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new().connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Creates the `todos` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TODOS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn find_all(&self) -> StoreResult<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, body, completed, created_at, updated_at
            FROM todos
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, body, completed, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn insert(&self, todo: &NewTodo) -> StoreResult<TodoId> {
        let id = sqlx::query_scalar::<_, TodoId>(
            r#"
            INSERT INTO todos (body, completed, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id
            "#,
        )
        .bind(&todo.body)
        .bind(todo.completed)
        .bind(todo.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_by_id(&self, id: TodoId, changes: &TodoChanges) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET
                body = COALESCE($2, body),
                completed = COALESCE($3, completed),
                updated_at = GREATEST(updated_at, $4)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.body.as_deref())
        .bind(changes.completed)
        .bind(changes.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: TodoId) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
