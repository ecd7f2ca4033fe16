pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Body returned for every error response.
///
/// ```json
/// {
///   "code": 1008,
///   "error": "TASK_TITLE_ALREADY_EXISTS",
///   "message": "A task with this title already exists"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Numeric category code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable message
    pub message: String,
    /// Optional structured details (field errors, violated rule, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Underlying cause of a server-side failure.
///
/// Attached to the response as an extension, never serialized by itself.
/// [`crate::http::expose_error_details`] copies it into the body when the
/// application runs in development mode.
#[derive(Debug, Clone)]
pub struct ErrorCause(pub String);

/// A failure reported by a domain crate with its own machine code.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub kind: ErrorCode,
    pub error: &'static str,
    pub message: String,
    pub details: Option<Value>,
    pub cause: Option<String>,
}

impl DomainError {
    pub fn new(kind: ErrorCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            error,
            message: message.into(),
            details: None,
            cause: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Application error type that renders as an [`ErrorResponse`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    Domain(DomainError),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Domain(err)
    }
}

impl AppError {
    /// Breaks the error into `(category, machine code, message, details, cause)`.
    fn into_parts(self) -> (ErrorCode, String, String, Option<Value>, Option<String>) {
        let plain = |kind: ErrorCode, message: String| {
            (kind, kind.as_str().to_string(), message, None, None)
        };

        match self {
            AppError::JsonExtractorRejection(e) => plain(ErrorCode::JsonExtraction, e.body_text()),
            AppError::QueryExtractorRejection(e) => plain(ErrorCode::InvalidQuery, e.body_text()),
            AppError::ValidationError(e) => (
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.as_str().to_string(),
                ErrorCode::ValidationError.default_message().to_string(),
                serde_json::to_value(&e).ok(),
                None,
            ),
            AppError::UuidError(e) => (
                ErrorCode::InvalidUuid,
                ErrorCode::InvalidUuid.as_str().to_string(),
                ErrorCode::InvalidUuid.default_message().to_string(),
                None,
                Some(e.to_string()),
            ),
            AppError::BadRequest(msg) => plain(ErrorCode::ValidationError, msg),
            AppError::NotFound(msg) => plain(ErrorCode::NotFound, msg),
            AppError::Conflict(msg) => plain(ErrorCode::Conflict, msg),
            AppError::InternalServerError(cause) => (
                ErrorCode::InternalError,
                ErrorCode::InternalError.as_str().to_string(),
                ErrorCode::InternalError.default_message().to_string(),
                None,
                Some(cause),
            ),
            AppError::ServiceUnavailable(msg) => plain(ErrorCode::ServiceUnavailable, msg),
            AppError::Domain(e) => (e.kind, e.error.to_string(), e.message, e.details, e.cause),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Body shape errors are reported as 400 like every other input error; only a
        // missing JSON content type keeps axum's 415.
        let status_override = match &self {
            AppError::JsonExtractorRejection(JsonRejection::MissingJsonContentType(e)) => {
                Some(e.status())
            }
            _ => None,
        };

        let (kind, error, message, details, cause) = self.into_parts();
        let status = status_override.unwrap_or_else(|| kind.status());

        if status.is_server_error() {
            tracing::error!(
                error_code = kind.code(),
                error = %error,
                cause = cause.as_deref().unwrap_or("-"),
                "{}",
                message
            );
        } else {
            tracing::info!(error_code = kind.code(), error = %error, "{}", message);
        }

        let body = Json(ErrorResponse {
            code: kind.code(),
            error,
            message,
            details,
        });

        let mut response = (status, body).into_response();
        if let Some(cause) = cause {
            response.extensions_mut().insert(ErrorCause(cause));
        }
        response
    }
}

/// Renders a bare category error, used by fallbacks.
pub fn error_response(kind: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: kind.code(),
        error: kind.as_str().to_string(),
        message: kind.default_message().to_string(),
        details: None,
    });

    (kind.status(), body).into_response()
}
