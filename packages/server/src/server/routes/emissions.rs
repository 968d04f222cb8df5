//! Ledger reads, appends, and consolidated totals.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::OrganizationId;
use crate::domains::emissions::{
    aggregate, aggregate_rollup, AggregatedEmissions, EmissionEntry, NewEmissionEntry,
};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::middleware::AuthUser;
use crate::server::validate::validate_new_entry;

use super::require_auth;

pub async fn list_emissions_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(organization_id): Path<OrganizationId>,
) -> ApiResult<Json<Vec<EmissionEntry>>> {
    let user = require_auth(user)?;
    if !user.can_access_emissions(organization_id) {
        return Err(ApiError::Forbidden);
    }

    Ok(Json(state.ledger.list_by_organization(organization_id).await))
}

pub async fn append_emission_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(organization_id): Path<OrganizationId>,
    Json(input): Json<NewEmissionEntry>,
) -> ApiResult<(StatusCode, Json<EmissionEntry>)> {
    let user = require_auth(user)?;
    if !user.can_access_emissions(organization_id) {
        return Err(ApiError::Forbidden);
    }
    validate_new_entry(&input)?;

    let entry = state.ledger.append(organization_id, input).await;
    tracing::debug!(organization = %organization_id, entry = %entry.id, "ledger entry appended");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateQuery {
    #[serde(default)]
    pub include_descendants: bool,
    /// Walk the whole subtree with multiplied weights instead of the
    /// default single-level consolidation.
    #[serde(default)]
    pub rollup: bool,
}

pub async fn aggregate_emissions_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(organization_id): Path<OrganizationId>,
    Query(query): Query<AggregateQuery>,
) -> ApiResult<Json<AggregatedEmissions>> {
    let user = require_auth(user)?;
    if !user.can_access_emissions(organization_id) {
        return Err(ApiError::Forbidden);
    }

    tracing::debug!(
        organization = %organization_id,
        include_descendants = query.include_descendants,
        rollup = query.rollup,
        "consolidating emissions"
    );

    let totals = if query.rollup {
        aggregate_rollup(state.directory.as_ref(), state.ledger.as_ref(), organization_id).await?
    } else {
        aggregate(
            state.directory.as_ref(),
            state.ledger.as_ref(),
            organization_id,
            query.include_descendants,
        )
        .await?
    };
    Ok(Json(totals))
}
