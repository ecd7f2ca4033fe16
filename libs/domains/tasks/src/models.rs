use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Task status
///
/// Serialized by name. Requests may also send the numeric code
/// (`0` Pending, `1` InProgress, `2` Completed).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(try_from = "StatusInput")]
#[strum(ascii_case_insensitive)]
pub enum TaskStatus {
    /// Not started
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Being worked on
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Done
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl TaskStatus {
    pub fn code(self) -> u8 {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TaskStatus::Pending),
            1 => Some(TaskStatus::InProgress),
            2 => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusInput {
    Code(i64),
    Name(String),
}

impl TryFrom<StatusInput> for TaskStatus {
    type Error = String;

    fn try_from(input: StatusInput) -> Result<Self, Self::Error> {
        match input {
            StatusInput::Code(code) => TaskStatus::from_code(code)
                .ok_or_else(|| format!("invalid task status code {code}, expected 0, 1 or 2")),
            StatusInput::Name(name) => name
                .parse()
                .map_err(|_| format!("unknown task status '{name}'")),
        }
    }
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,
    /// Unique title, at most 200 characters
    pub title: String,
    pub description: String,
    /// Must lie in the future whenever the task is created or edited
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    /// Creation timestamp, never changes
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a new task with a fresh id and the current time as `created_at`.
    ///
    /// Nothing is validated here; run [`crate::validator::validate_task`]
    /// before persisting.
    pub fn new(
        title: String,
        description: String,
        due_date: DateTime<Utc>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            due_date,
            status,
            // Postgres keeps microseconds; truncating keeps stored and returned values equal.
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    /// Overwrites every editable field. `id` and `created_at` are kept.
    pub fn update(
        &mut self,
        title: String,
        description: String,
        due_date: DateTime<Utc>,
        status: TaskStatus,
    ) {
        self.title = title;
        self.description = description;
        self.due_date = due_date;
        self.status = status;
    }

    pub fn update_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}

/// Body of `POST /tasks` and `PUT /tasks/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[validate(length(max = 200, message = "Title cannot exceed 200 characters"))]
    pub title: String,
    /// Optional; missing or `null` is stored as an empty string
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(
        max = 4000,
        message = "Description cannot exceed 4000 characters"
    ))]
    pub description: String,
    /// RFC 3339 timestamp; a value without an offset is read as UTC
    #[serde(deserialize_with = "utc_or_naive")]
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn utc_or_naive<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(zoned) = raw.parse::<DateTime<Utc>>() {
        return Ok(zoned);
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid dueDate '{raw}', expected an RFC 3339 timestamp"
            ))
        })
}

/// Body of `PATCH /tasks/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskStatus {
    pub status: TaskStatus,
}

/// Paging parameters for listing tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// Number of tasks to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of tasks to return
    #[serde(default = "default_take")]
    pub take: u64,
}

fn default_take() -> u64 {
    10
}

impl Default for ListTasksQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            take: default_take(),
        }
    }
}

/// One page of tasks, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskPage {
    pub items: Vec<Task>,
    /// Number of stored tasks, independent of paging
    pub total: u64,
    pub skip: u64,
    pub take: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_accepts_codes_and_names() {
        let from_code: TaskStatus = serde_json::from_value(json!(1)).unwrap();
        let from_name: TaskStatus = serde_json::from_value(json!("Completed")).unwrap();
        let lowercase: TaskStatus = serde_json::from_value(json!("pending")).unwrap();

        assert_eq!(from_code, TaskStatus::InProgress);
        assert_eq!(from_name, TaskStatus::Completed);
        assert_eq!(lowercase, TaskStatus::Pending);
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(serde_json::from_value::<TaskStatus>(json!(3)).is_err());
        assert!(serde_json::from_value::<TaskStatus>(json!(-1)).is_err());
        assert!(serde_json::from_value::<TaskStatus>(json!("Archived")).is_err());
    }

    #[test]
    fn status_serializes_by_name() {
        assert_eq!(serde_json::to_value(TaskStatus::InProgress).unwrap(), json!("InProgress"));
        assert_eq!(TaskStatus::Completed.to_string(), "Completed");
        assert_eq!(TaskStatus::Completed.code(), 2);
    }

    #[test]
    fn task_uses_camel_case_fields() {
        let task = Task::new(
            "Write docs".into(),
            "draft".into(),
            Utc::now() + chrono::Duration::days(1),
            TaskStatus::Pending,
        );
        let value = serde_json::to_value(&task).unwrap();

        assert!(value.get("dueDate").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["status"], "Pending");
    }

    #[test]
    fn update_keeps_identity() {
        let mut task = Task::new(
            "Old".into(),
            "d".into(),
            Utc::now() + chrono::Duration::days(1),
            TaskStatus::Pending,
        );
        let (id, created_at) = (task.id, task.created_at);

        task.update(
            "New".into(),
            "e".into(),
            Utc::now() + chrono::Duration::days(2),
            TaskStatus::Completed,
        );

        assert_eq!(task.id, id);
        assert_eq!(task.created_at, created_at);
        assert_eq!(task.title, "New");
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn request_description_defaults_to_empty() {
        let request: TaskRequest = serde_json::from_value(json!({
            "title": "t",
            "dueDate": "2030-01-01T00:00:00Z",
            "status": 0
        }))
        .unwrap();

        assert_eq!(request.description, "");
        assert_eq!(request.status, TaskStatus::Pending);
    }

    #[test]
    fn request_null_description_becomes_empty() {
        let request: TaskRequest = serde_json::from_value(json!({
            "title": "t",
            "description": null,
            "dueDate": "2030-01-01T00:00:00Z",
            "status": "InProgress"
        }))
        .unwrap();

        assert_eq!(request.description, "");
        assert_eq!(request.status, TaskStatus::InProgress);
    }

    #[test]
    fn request_requires_status() {
        let result = serde_json::from_value::<TaskRequest>(json!({
            "title": "t",
            "description": "d",
            "dueDate": "2030-01-01T00:00:00Z"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn request_due_date_without_offset_is_utc() {
        let request: TaskRequest = serde_json::from_value(json!({
            "title": "t",
            "dueDate": "2030-01-01T08:30:00",
            "status": 0
        }))
        .unwrap();
        let offset: TaskRequest = serde_json::from_value(json!({
            "title": "t",
            "dueDate": "2030-01-01T10:30:00+02:00",
            "status": 0
        }))
        .unwrap();

        assert_eq!(request.due_date.to_rfc3339(), "2030-01-01T08:30:00+00:00");
        assert_eq!(offset.due_date, request.due_date);
        assert!(
            serde_json::from_value::<TaskRequest>(json!({
                "title": "t",
                "dueDate": "next tuesday",
                "status": 0
            }))
            .is_err()
        );
    }

    #[test]
    fn list_query_defaults() {
        let query = ListTasksQuery::default();
        assert_eq!((query.skip, query.take), (0, 10));
    }
}
