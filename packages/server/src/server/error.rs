//! HTTP error contract shared by every route.
//!
//! Errors serialize as `{"error": {"code", "message", "fields"?}}` with the
//! status code implied by the variant, so clients can branch on `code`
//! without parsing prose.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::common::OrganizationId;
use crate::domains::auth::AuthError;
use crate::domains::emissions::AggregationError;
use crate::domains::organization::DirectoryError;

pub type ApiResult<T> = Result<T, ApiError>;

/// A single input field that failed validation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    AuthenticationRequired,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("access to this organization is not permitted")]
    Forbidden,

    #[error("organization {0} not found")]
    OrganizationNotFound(OrganizationId),

    #[error("no published factor matches the query")]
    FactorNotFound,

    #[error("validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::AuthenticationRequired | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::OrganizationNotFound(_) | Self::FactorNotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "authentication_required",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Forbidden => "forbidden",
            Self::OrganizationNotFound(_) => "organization_not_found",
            Self::FactorNotFound => "factor_not_found",
            Self::Validation(_) => "validation_failed",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The wire message for internal errors is fixed; the cause goes to
        // the log, never to the client.
        if let Self::Internal(err) = &self {
            tracing::error!(error = ?err, "request failed");
        }

        let mut error = json!({
            "code": self.code(),
            "message": self.to_string(),
        });
        if let Self::Validation(fields) = &self {
            error["fields"] = json!(fields);
        }

        (self.status(), Json(json!({ "error": error }))).into_response()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(id) => Self::OrganizationNotFound(id),
        }
    }
}

impl From<AggregationError> for ApiError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::OrganizationNotFound(id) => Self::OrganizationNotFound(id),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::Internal(err) => Self::Internal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::AuthenticationRequired.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::OrganizationNotFound(OrganizationId::new()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation(vec![]).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_directory_not_found_maps_to_404() {
        let id = OrganizationId::new();
        let err: ApiError = DirectoryError::NotFound(id).into();
        assert!(matches!(err, ApiError::OrganizationNotFound(got) if got == id));
    }

    #[test]
    fn test_validation_carries_field_details() {
        let err = ApiError::Validation(vec![FieldViolation::new("name", "too short")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_message_is_not_leaked() {
        let err = ApiError::Internal(anyhow::anyhow!("connection string with secrets"));
        assert_eq!(err.to_string(), "internal error");
    }
}
