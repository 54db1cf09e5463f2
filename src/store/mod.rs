//! Record store seam.
//!
//! Handlers only see `dyn TodoStore`; the backing implementation is picked
//! once at startup and injected through `AppState`.

mod memory;
mod postgres;

pub use memory::MemoryTodoStore;
pub use postgres::PgTodoStore;

use async_trait::async_trait;

use crate::routes::todos::model::{NewTodo, Todo, TodoId};
use crate::routes::todos::validation::TodoChanges;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Every record, in the store's natural order.
    async fn find_all(&self) -> StoreResult<Vec<Todo>>;

    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>>;

    /// Persists `todo` and returns the identifier the store assigned to it.
    async fn insert(&self, todo: &NewTodo) -> StoreResult<TodoId>;

    /// Applies `changes` to the matching record and returns how many matched.
    ///
    /// `updated_at` never moves backwards.
    async fn update_by_id(&self, id: TodoId, changes: &TodoChanges) -> StoreResult<u64>;

    /// Removes the matching record and returns how many were removed.
    async fn delete_by_id(&self, id: TodoId) -> StoreResult<u64>;

    async fn ping(&self) -> StoreResult<()>;
}
