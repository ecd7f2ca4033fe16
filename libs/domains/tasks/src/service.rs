use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{ListTasksQuery, Task, TaskPage, TaskRequest, TaskStatus};
use crate::repository::TaskRepository;
use crate::validator::validate_task;

const SAVE_FAILED: &str = "Failed to save the task";
const QUERY_FAILED: &str = "Failed to query tasks";
const DELETE_FAILED: &str = "Failed to delete the task";

/// Turns a raw storage failure into [`TaskError::Internal`] with a generic message.
/// Domain errors pass through untouched.
fn internal(message: &'static str) -> impl Fn(TaskError) -> TaskError {
    move |err| match err {
        TaskError::Database(cause) => {
            tracing::error!(error = %cause, "{}", message);
            TaskError::Internal { message, cause }
        }
        other => other,
    }
}

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a task with a unique title and a due date in the future
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_task(&self, input: TaskRequest) -> TaskResult<Task> {
        if self.title_taken(&input.title).await? {
            tracing::info!("Rejected task with duplicate title");
            return Err(TaskError::DuplicateTitle(input.title));
        }

        let task = Task::new(input.title, input.description, input.due_date, input.status);
        validate_task(&task)?;

        let task = self
            .repository
            .add(task)
            .await
            .map_err(internal(SAVE_FAILED))?;

        tracing::debug!(task_id = %task.id, "Task created");
        Ok(task)
    }

    /// One page of tasks plus the overall count
    #[instrument(skip(self))]
    pub async fn list_tasks(&self, query: ListTasksQuery) -> TaskResult<TaskPage> {
        let (items, total) = tokio::try_join!(
            self.repository.list(query.skip, query.take),
            self.repository.count(),
        )
        .map_err(internal(QUERY_FAILED))?;

        Ok(TaskPage {
            items,
            total,
            skip: query.skip,
            take: query.take,
        })
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: Uuid) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await
            .map_err(internal(QUERY_FAILED))?
            .ok_or(TaskError::NotFound(id))
    }

    /// Replace every editable field of a task.
    ///
    /// The stored task is only written once the edited copy passes validation.
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn update_task(&self, id: Uuid, input: TaskRequest) -> TaskResult<Task> {
        let mut task = self.get_task(id).await?;

        // Keeping the current title never conflicts
        if task.title != input.title && self.title_taken(&input.title).await? {
            tracing::info!(title = %input.title, "Rejected rename to a taken title");
            return Err(TaskError::DuplicateTitle(input.title));
        }

        task.update(input.title, input.description, input.due_date, input.status);
        validate_task(&task)?;

        self.repository
            .update(task)
            .await
            .map_err(internal(SAVE_FAILED))
    }

    /// Change only the status; other fields are not re-validated
    #[instrument(skip(self), fields(task_id = %id, status = %status))]
    pub async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> TaskResult<Task> {
        let mut task = self.get_task(id).await?;
        task.update_status(status);

        self.repository
            .update(task)
            .await
            .map_err(internal(SAVE_FAILED))
    }

    /// Delete a task
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: Uuid) -> TaskResult<()> {
        self.get_task(id).await?;

        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(internal(DELETE_FAILED))?;

        // Removed by a concurrent request in between
        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }

    async fn title_taken(&self, title: &str) -> TaskResult<bool> {
        self.repository
            .exists_by_title(title)
            .await
            .map_err(internal(QUERY_FAILED))
    }
}
