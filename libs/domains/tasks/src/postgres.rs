use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::Task,
    repository::TaskRepository,
};

pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// The unique index on `tasks.title` closes the check-then-insert race.
fn map_write_error(err: DbErr, task: &Task) -> TaskError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => TaskError::DuplicateTitle(task.title.clone()),
        _ => match err {
            DbErr::RecordNotUpdated => TaskError::NotFound(task.id),
            other => TaskError::from(other),
        },
    }
}

// LIMIT/OFFSET are bigint in Postgres.
fn clamp(value: u64) -> u64 {
    value.min(i64::MAX as u64)
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, skip: u64, take: u64) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .offset(clamp(skip))
            .limit(clamp(take))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> TaskResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }

    async fn exists_by_title(&self, title: &str) -> TaskResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Title.eq(title))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn add(&self, task: Task) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = task.clone().into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error(e, &task))?;

        tracing::info!(task_id = %model.id, "Created task");
        Ok(model.into())
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = task.clone().into();

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| map_write_error(e, &task))?;

        tracing::info!(task_id = %model.id, "Updated task");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
