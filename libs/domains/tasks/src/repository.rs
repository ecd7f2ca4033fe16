use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::Task;

/// Repository trait for Task persistence
///
/// Implementations must keep titles unique: `add` and `update` fail with
/// [`TaskError::DuplicateTitle`] when another task already uses the title.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get a task by ID
    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>>;

    /// One page of tasks, newest first (ties broken by id)
    async fn list(&self, skip: u64, take: u64) -> TaskResult<Vec<Task>>;

    /// Total number of stored tasks
    async fn count(&self) -> TaskResult<u64>;

    /// Whether any task uses exactly this title
    async fn exists_by_title(&self, title: &str) -> TaskResult<bool>;

    /// Insert a new task
    async fn add(&self, task: Task) -> TaskResult<Task>;

    /// Replace a stored task; [`TaskError::NotFound`] if it is gone
    async fn update(&self, task: Task) -> TaskResult<Task>;

    /// Delete a task by ID, `false` if nothing was deleted
    async fn delete(&self, id: Uuid) -> TaskResult<bool>;
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn list(&self, skip: u64, take: u64) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;

        let mut result: Vec<Task> = tasks.values().cloned().collect();

        // Newest first, id as tie-breaker
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(result
            .into_iter()
            .skip(to_usize(skip))
            .take(to_usize(take))
            .collect())
    }

    async fn count(&self) -> TaskResult<u64> {
        let tasks = self.tasks.read().await;
        Ok(tasks.len() as u64)
    }

    async fn exists_by_title(&self, title: &str) -> TaskResult<bool> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().any(|t| t.title == title))
    }

    async fn add(&self, task: Task) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;

        // Checked under the write lock so concurrent creates cannot both pass
        if tasks.values().any(|t| t.title == task.title) {
            return Err(TaskError::DuplicateTitle(task.title));
        }

        tasks.insert(task.id, task.clone());

        tracing::info!(task_id = %task.id, "Created task");
        Ok(task)
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;

        if !tasks.contains_key(&task.id) {
            return Err(TaskError::NotFound(task.id));
        }

        if tasks
            .values()
            .any(|t| t.id != task.id && t.title == task.title)
        {
            return Err(TaskError::DuplicateTitle(task.title));
        }

        tasks.insert(task.id, task.clone());

        tracing::info!(task_id = %task.id, "Updated task");
        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;

        if tasks.remove(&id).is_some() {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
