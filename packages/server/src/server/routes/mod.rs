// HTTP routes
pub mod auth;
pub mod emissions;
pub mod health;
pub mod organizations;
pub mod reference;

pub use auth::*;
pub use emissions::*;
pub use health::*;
pub use organizations::*;
pub use reference::*;

use axum::extract::Extension;

use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

/// Unwrap the `AuthUser` installed by the JWT middleware, or reject.
pub(crate) fn require_auth(user: Option<Extension<AuthUser>>) -> Result<AuthUser, ApiError> {
    user.map(|Extension(user)| user)
        .ok_or(ApiError::AuthenticationRequired)
}
