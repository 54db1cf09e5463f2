use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreResult, TodoStore};
use crate::routes::todos::model::{NewTodo, Todo, TodoId};
use crate::routes::todos::validation::TodoChanges;

/// Process-local store. Records keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn find_all(&self) -> StoreResult<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, todo: &NewTodo) -> StoreResult<TodoId> {
        let id = TodoId::generate();
        self.todos.write().await.push(todo.clone().into_todo(id));
        Ok(id)
    }

    async fn update_by_id(&self, id: TodoId, changes: &TodoChanges) -> StoreResult<u64> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(0);
        };

        if let Some(body) = &changes.body {
            todo.body = body.clone();
        }
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        todo.updated_at = todo.updated_at.max(changes.updated_at);

        Ok(1)
    }

    async fn delete_by_id(&self, id: TodoId) -> StoreResult<u64> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        Ok((before - todos.len()) as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
