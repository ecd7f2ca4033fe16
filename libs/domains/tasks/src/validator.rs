//! Business rules a task must satisfy whenever it is created or edited.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::Task;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 4000;

/// A broken task rule. The `Display` text is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TaskViolation {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Title cannot exceed 200 characters")]
    TitleTooLong,

    #[error("Description is required")]
    EmptyDescription,

    #[error("Due date cannot be in the past")]
    PastDueDate,
}

impl TaskViolation {
    /// Stable rule identifier reported to clients.
    pub fn code(self) -> &'static str {
        match self {
            TaskViolation::EmptyTitle => "TASK_EMPTY_TITLE",
            TaskViolation::TitleTooLong => "TASK_TITLE_TOO_LONG",
            TaskViolation::EmptyDescription => "TASK_EMPTY_DESCRIPTION",
            TaskViolation::PastDueDate => "TASK_PAST_DUE_DATE",
        }
    }

    /// JSON name of the offending field.
    pub fn field(self) -> &'static str {
        match self {
            TaskViolation::EmptyTitle | TaskViolation::TitleTooLong => "title",
            TaskViolation::EmptyDescription => "description",
            TaskViolation::PastDueDate => "dueDate",
        }
    }
}

/// Checks every rule against `now` and returns all violations in rule order.
pub fn validate_task_at(task: &Task, now: DateTime<Utc>) -> Result<(), Vec<TaskViolation>> {
    let mut violations = Vec::new();

    if task.title.trim().is_empty() {
        violations.push(TaskViolation::EmptyTitle);
    }
    if task.title.chars().count() > TITLE_MAX_CHARS {
        violations.push(TaskViolation::TitleTooLong);
    }
    if task.description.trim().is_empty() {
        violations.push(TaskViolation::EmptyDescription);
    }
    if task.due_date <= now {
        violations.push(TaskViolation::PastDueDate);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// [`validate_task_at`] against the wall clock.
pub fn validate_task(task: &Task) -> Result<(), Vec<TaskViolation>> {
    validate_task_at(task, Utc::now())
}
