//! # Axum Helpers
//!
//! Shared building blocks for the workspace's Axum services.
//!
//! - **[`errors`]**: `AppError`, `ErrorCode` and the JSON `ErrorResponse` body
//! - **[`extractors`]**: `UuidPath`, `ValidatedJson`, `QueryParams`
//! - **[`http`]**: CORS, security headers, development-only error details
//! - **[`server`]**: router assembly with OpenAPI viewers, health checks, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{CorsConfig, create_cors_layer, expose_error_details, security_headers};

pub use errors::{AppError, DomainError, ErrorCause, ErrorCode, ErrorResponse};

pub use extractors::{QueryParams, UuidPath, ValidatedJson};
