//! HTTP middleware: CORS, security headers and development-only error details.

pub mod cors;
pub mod error_details;
pub mod security;

pub use cors::{CorsConfig, create_cors_layer};
pub use error_details::expose_error_details;
pub use security::security_headers;
