//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::{AuthService, JwtService, UserDirectory};
use crate::domains::emissions::{EmissionsLedger, InMemoryEmissionsLedger};
use crate::domains::organization::{InMemoryOrganizationDirectory, OrganizationDirectory};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    aggregate_emissions_handler, append_emission_handler, categories_handler,
    create_organization_handler, delete_organization_handler, factor_handler,
    factor_sources_handler, get_organization_handler, health_handler, list_emissions_handler,
    list_organizations_handler, login_handler, logout_handler, register_handler, units_handler,
    update_organization_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn OrganizationDirectory>,
    pub ledger: Arc<dyn EmissionsLedger>,
    pub users: UserDirectory,
    pub auth: AuthService,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Fresh in-memory stores wired to the configured JWT service.
    pub fn new(config: &Config) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
        ));
        let users = UserDirectory::new();
        let auth = AuthService::new(users.clone(), jwt_service.clone());

        Self {
            directory: Arc::new(InMemoryOrganizationDirectory::new()),
            ledger: Arc::new(InMemoryEmissionsLedger::new()),
            users,
            auth,
            jwt_service,
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = cors_layer(allowed_origins);

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = state.jwt_service.clone();

    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Auth
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/logout", post(logout_handler))
        // Organization directory
        .route(
            "/api/organizations",
            get(list_organizations_handler).post(create_organization_handler),
        )
        .route(
            "/api/organizations/:id",
            get(get_organization_handler)
                .patch(update_organization_handler)
                .delete(delete_organization_handler),
        )
        // Emission ledgers
        .route(
            "/api/emissions/:organization_id",
            get(list_emissions_handler).post(append_emission_handler),
        )
        .route(
            "/api/emissions/:organization_id/aggregate",
            get(aggregate_emissions_handler),
        )
        // Reference data
        .route("/api/reference/categories", get(categories_handler))
        .route("/api/reference/units", get(units_handler))
        .route("/api/reference/factor-sources", get(factor_sources_handler))
        .route("/api/reference/factors", get(factor_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        })) // JWT authentication
        .layer(Extension(state)) // Add shared state (must be after middlewares that need it)
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
}

/// Permissive CORS when `*` is configured, otherwise an explicit allowlist.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
