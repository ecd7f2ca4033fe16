use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, DomainError, ErrorCode};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::validator::TaskViolation;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(Uuid),

    #[error("A task with title '{0}' already exists")]
    DuplicateTitle(String),

    #[error("{0}")]
    Validation(TaskViolation),

    /// A storage failure after it has been reported by the service layer.
    #[error("{message}: {cause}")]
    Internal {
        message: &'static str,
        cause: String,
    },

    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    /// Machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            TaskError::NotFound(_) => "TASK_NOT_FOUND",
            TaskError::DuplicateTitle(_) => "TASK_TITLE_ALREADY_EXISTS",
            TaskError::Validation(_) => "VALIDATION_ERROR",
            TaskError::Internal { .. } | TaskError::Database(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<Vec<TaskViolation>> for TaskError {
    /// Keeps the first violation; callers only get one message back.
    fn from(violations: Vec<TaskViolation>) -> Self {
        match violations.first() {
            Some(violation) => TaskError::Validation(*violation),
            None => TaskError::Internal {
                message: "Validation failed",
                cause: "empty violation list".to_string(),
            },
        }
    }
}

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        let code = err.code();
        let domain = match err {
            TaskError::NotFound(id) => {
                DomainError::new(ErrorCode::NotFound, code, "Task not found")
                    .with_details(json!({ "id": id }))
            }
            TaskError::DuplicateTitle(title) => DomainError::new(
                ErrorCode::Conflict,
                code,
                "A task with this title already exists",
            )
            .with_details(json!({ "title": title })),
            TaskError::Validation(violation) => {
                DomainError::new(ErrorCode::ValidationError, code, violation.to_string())
                    .with_details(json!({ "field": violation.field(), "rule": violation.code() }))
            }
            TaskError::Internal { message, cause } => {
                DomainError::new(ErrorCode::InternalError, code, message).with_cause(cause)
            }
            TaskError::Database(cause) => DomainError::new(
                ErrorCode::InternalError,
                code,
                ErrorCode::InternalError.default_message(),
            )
            .with_cause(cause),
        };

        AppError::from(domain)
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(err: TaskError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn duplicate_title_is_conflict() {
        let (status, body) = render(TaskError::DuplicateTitle("Write spec".into())).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "TASK_TITLE_ALREADY_EXISTS");
        assert_eq!(body["details"]["title"], "Write spec");
    }

    #[tokio::test]
    async fn validation_reports_rule_and_field() {
        let (status, body) = render(TaskError::Validation(TaskViolation::PastDueDate)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Due date cannot be in the past");
        assert_eq!(body["details"]["rule"], "TASK_PAST_DUE_DATE");
        assert_eq!(body["details"]["field"], "dueDate");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = render(TaskError::NotFound(Uuid::nil())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "TASK_NOT_FOUND");
    }

    #[tokio::test]
    async fn internal_error_hides_cause() {
        let (status, body) = render(TaskError::Internal {
            message: "Failed to save the task",
            cause: "connection refused".into(),
        })
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["message"], "Failed to save the task");
        assert!(!body.to_string().contains("connection refused"));
    }

    #[test]
    fn first_violation_wins() {
        let err = TaskError::from(vec![TaskViolation::EmptyTitle, TaskViolation::PastDueDate]);
        assert!(matches!(err, TaskError::Validation(TaskViolation::EmptyTitle)));
    }
}
