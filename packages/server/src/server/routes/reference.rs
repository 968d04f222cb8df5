//! Read-only reference data: categories, units, factor sources, and
//! published emission factors.

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::Deserialize;

use crate::domains::emissions::catalog::{
    categories_for_scope, lookup_factor, EmissionCategory, FactorSource, MeasurementUnit,
    PublishedFactor, EMISSION_CATEGORIES, EMISSION_FACTOR_SOURCES, EMISSION_UNITS,
};
use crate::domains::emissions::Scope;
use crate::server::error::{ApiError, ApiResult};
use crate::server::middleware::AuthUser;

use super::require_auth;

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    pub scope: Option<Scope>,
}

pub async fn categories_handler(
    user: Option<Extension<AuthUser>>,
    Query(query): Query<CategoriesQuery>,
) -> ApiResult<Json<Vec<EmissionCategory>>> {
    require_auth(user)?;

    let categories = match query.scope {
        Some(scope) => categories_for_scope(scope).copied().collect(),
        None => EMISSION_CATEGORIES.to_vec(),
    };
    Ok(Json(categories))
}

pub async fn units_handler(
    user: Option<Extension<AuthUser>>,
) -> ApiResult<Json<&'static [MeasurementUnit]>> {
    require_auth(user)?;
    Ok(Json(EMISSION_UNITS))
}

pub async fn factor_sources_handler(
    user: Option<Extension<AuthUser>>,
) -> ApiResult<Json<&'static [FactorSource]>> {
    require_auth(user)?;
    Ok(Json(EMISSION_FACTOR_SOURCES))
}

#[derive(Debug, Deserialize)]
pub struct FactorQuery {
    pub category: String,
    pub source: String,
    pub publisher: String,
}

pub async fn factor_handler(
    user: Option<Extension<AuthUser>>,
    Query(query): Query<FactorQuery>,
) -> ApiResult<Json<PublishedFactor>> {
    require_auth(user)?;

    let factor = lookup_factor(&query.category, &query.source, &query.publisher)
        .ok_or(ApiError::FactorNotFound)?;
    Ok(Json(*factor))
}
