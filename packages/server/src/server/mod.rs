// HTTP server setup (Axum)
pub mod app;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod validate;

pub use app::*;
pub use error::{ApiError, ApiResult, FieldViolation};
