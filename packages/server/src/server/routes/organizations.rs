//! CRUD over the organization directory.
//!
//! Every route requires authentication; record-level routes additionally
//! pass the access gate before touching the store. Audit stamps carry the
//! acting account's email.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::common::OrganizationId;
use crate::domains::organization::{NewOrganization, Organization, OrganizationPatch};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::middleware::AuthUser;
use crate::server::validate::{validate_new_organization, validate_organization_patch};

use super::require_auth;

pub async fn list_organizations_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
) -> ApiResult<Json<Vec<Organization>>> {
    require_auth(user)?;
    Ok(Json(state.directory.list().await))
}

pub async fn get_organization_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<OrganizationId>,
) -> ApiResult<Json<Organization>> {
    let user = require_auth(user)?;
    if !user.can_access_organization(id) {
        return Err(ApiError::Forbidden);
    }

    let organization = state
        .directory
        .get(id)
        .await
        .ok_or(ApiError::OrganizationNotFound(id))?;
    Ok(Json(organization))
}

pub async fn create_organization_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(input): Json<NewOrganization>,
) -> ApiResult<(StatusCode, Json<Organization>)> {
    let user = require_auth(user)?;
    validate_new_organization(&input)?;

    let organization = state.directory.create(input, &user.email).await;
    tracing::debug!(organization = %organization.id, created_by = %user.email, "organization created");
    Ok((StatusCode::CREATED, Json(organization)))
}

pub async fn update_organization_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<OrganizationId>,
    Json(patch): Json<OrganizationPatch>,
) -> ApiResult<Json<Organization>> {
    let user = require_auth(user)?;
    if !user.can_access_organization(id) {
        return Err(ApiError::Forbidden);
    }
    validate_organization_patch(&patch)?;

    let organization = state.directory.update(id, patch, &user.email).await?;
    tracing::debug!(organization = %id, updated_by = %user.email, "organization updated");
    Ok(Json(organization))
}

pub async fn delete_organization_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<OrganizationId>,
) -> ApiResult<Json<Value>> {
    let user = require_auth(user)?;
    if !user.can_access_organization(id) {
        return Err(ApiError::Forbidden);
    }

    state.directory.delete(id).await?;
    tracing::debug!(organization = %id, deleted_by = %user.email, "organization deleted");
    Ok(Json(json!({ "success": true })))
}
