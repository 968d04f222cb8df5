//! Login and registration over the in-memory account directory.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use super::jwt::JwtService;
use super::models::{User, UserProfile};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// In-memory account directory.
///
/// Accounts are provisioned by the demo fixture at startup; there is no
/// self-service signup, so the directory only ever grows via [`insert`].
///
/// [`insert`]: UserDirectory::insert
#[derive(Clone, Default)]
pub struct UserDirectory {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.push(user);
    }

    /// Case-insensitive lookup by email.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned()
    }
}

/// Successful login payload: token plus the account's public profile.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// Authentication service: credential checks and token minting.
#[derive(Clone)]
pub struct AuthService {
    users: UserDirectory,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(users: UserDirectory, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    /// Verify credentials and mint a 24-hour token.
    ///
    /// Unknown email and wrong password both collapse into
    /// [`AuthError::InvalidCredentials`] so the response does not leak
    /// which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .filter(|user| user.verify_password(password))
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.jwt.create_token(&user)?;

        Ok(LoginResponse {
            token,
            user: user.profile(),
        })
    }

    /// Registration is disabled: accounts come from the demo fixture. The
    /// endpoint acknowledges the request without creating anything.
    pub fn register(&self) -> RegisterResponse {
        RegisterResponse {
            success: true,
            message: "Registration successful. Please use the demo account to login.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::OrganizationId;
    use crate::domains::auth::models::Role;

    async fn service_with_demo_user() -> AuthService {
        let users = UserDirectory::new();
        let jwt = Arc::new(JwtService::new("test_secret_key", "test_issuer".to_string()));
        let service = AuthService::new(users.clone(), jwt);

        let user = User::new(
            "demo@example.com",
            "Demo User",
            OrganizationId::new(),
            Role::Root,
            "password123",
        );
        users.insert(user).await;

        service
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let service = service_with_demo_user().await;

        let response = service
            .login("demo@example.com", "password123")
            .await
            .unwrap();

        assert!(!response.token.is_empty());
        assert_eq!(response.user.email, "demo@example.com");
        assert_eq!(response.user.role, Role::Root);
    }

    #[tokio::test]
    async fn test_login_is_case_insensitive_on_email() {
        let service = service_with_demo_user().await;

        let response = service.login("Demo@Example.COM", "password123").await;
        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let service = service_with_demo_user().await;

        let result = service.login("demo@example.com", "password124").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_with_unknown_email() {
        let service = service_with_demo_user().await;

        let result = service.login("nobody@example.com", "password123").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_register_is_a_no_op() {
        let service = service_with_demo_user().await;

        let response = service.register();
        assert!(response.success);
        assert!(response.message.contains("demo account"));
    }
}
