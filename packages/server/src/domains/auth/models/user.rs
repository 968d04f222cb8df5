use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::common::{OrganizationId, UserId};

/// Dashboard access role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Group-level account: may read and write every organization.
    Root,
    /// Bound to one subsidiary's organization.
    Subsidiary,
    /// Bound to one supplier's organization.
    Supplier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Subsidiary => "subsidiary",
            Self::Supplier => "supplier",
        }
    }
}

/// User - a dashboard account bound to one organization
///
/// Credentials are stored as SHA-256 digests; raw passwords never leave
/// the login handler.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub organization_id: OrganizationId,
    pub role: Role,
    pub password_hash: String,
}

impl User {
    pub fn new(
        email: &str,
        name: &str,
        organization_id: OrganizationId,
        role: Role,
        password: &str,
    ) -> Self {
        Self {
            id: UserId::new(),
            email: email.to_string(),
            name: name.to_string(),
            organization_id,
            role,
            password_hash: hash_password(password),
        }
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        hash_password(candidate) == self.password_hash
    }

    /// Public wire shape, credentials stripped.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            organization_id: self.organization_id,
            role: self.role,
        }
    }
}

/// Wire shape for a user, without credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub organization_id: OrganizationId,
    pub role: Role,
}

/// Hash a password using SHA256, hex-encoded.
///
/// Digests are fixed-length, so password comparison is a comparison of
/// equal-sized hex strings.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
