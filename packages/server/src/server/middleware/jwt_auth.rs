use crate::common::{OrganizationId, UserId};
use crate::domains::auth::{can_access_emissions, can_access_organization, JwtService, Role};
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub organization_id: OrganizationId,
    pub role: Role,
}

impl AuthUser {
    pub fn can_access_organization(&self, target: OrganizationId) -> bool {
        can_access_organization(self.role, self.organization_id, target)
    }

    pub fn can_access_emissions(&self, target: OrganizationId) -> bool {
        can_access_emissions(self.role, self.organization_id, target)
    }
}

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, and adds AuthUser to request extensions.
/// If no token or invalid token, request continues without AuthUser; handlers decide
/// whether the route requires authentication.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(
            "Authenticated user: {} (role: {})",
            user.email,
            user.role.as_str()
        );
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    // Get Authorization header
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    // Verify token
    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        user_id: UserId::from_uuid(claims.user_id),
        email: claims.email,
        organization_id: OrganizationId::from_uuid(claims.organization_id),
        role: claims.role,
    })
}
