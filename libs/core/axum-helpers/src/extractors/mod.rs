//! Extractors that reject with [`AppError`](crate::errors::AppError) bodies
//! instead of axum's plain-text rejections.

pub mod query_params;
pub mod uuid_path;
pub mod validated_json;

pub use query_params::QueryParams;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
