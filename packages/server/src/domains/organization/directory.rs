//! Organization directory - CRUD store for the corporate hierarchy.
//!
//! The directory deliberately enforces no referential integrity: creating an
//! organization with an unknown parent succeeds, and deleting a parent leaves
//! its children in place with a dangling reference. Aggregation simply finds
//! no children for dangling parents.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::common::OrganizationId;

use super::models::{NewOrganization, Organization, OrganizationPatch};

/// Errors from directory write operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("organization {0} not found")]
    NotFound(OrganizationId),
}

/// Repository seam for the organization directory.
///
/// Handlers and the aggregation engine depend on this trait rather than the
/// in-memory store, so a persistent implementation can be swapped in without
/// touching them.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    /// Insert a new organization and return the stored record.
    async fn create(&self, input: NewOrganization, created_by: &str) -> Organization;

    /// Fetch one organization by id.
    async fn get(&self, id: OrganizationId) -> Option<Organization>;

    /// Merge a partial update into an existing organization.
    async fn update(
        &self,
        id: OrganizationId,
        patch: OrganizationPatch,
        updated_by: &str,
    ) -> Result<Organization, DirectoryError>;

    /// Remove one organization. Children are left orphaned, not cascaded.
    async fn delete(&self, id: OrganizationId) -> Result<(), DirectoryError>;

    /// All organizations in insertion order.
    async fn list(&self) -> Vec<Organization>;
}

/// In-memory directory backed by a `Vec` so listings preserve insertion order.
#[derive(Clone, Default)]
pub struct InMemoryOrganizationDirectory {
    organizations: Arc<RwLock<Vec<Organization>>>,
}

impl InMemoryOrganizationDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrganizationDirectory for InMemoryOrganizationDirectory {
    async fn create(&self, input: NewOrganization, created_by: &str) -> Organization {
        let org = Organization::create(input, created_by);
        let mut organizations = self.organizations.write().await;
        organizations.push(org.clone());
        org
    }

    async fn get(&self, id: OrganizationId) -> Option<Organization> {
        let organizations = self.organizations.read().await;
        organizations.iter().find(|o| o.id == id).cloned()
    }

    async fn update(
        &self,
        id: OrganizationId,
        patch: OrganizationPatch,
        updated_by: &str,
    ) -> Result<Organization, DirectoryError> {
        let mut organizations = self.organizations.write().await;
        let org = organizations
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(DirectoryError::NotFound(id))?;
        org.apply(patch, updated_by);
        Ok(org.clone())
    }

    async fn delete(&self, id: OrganizationId) -> Result<(), DirectoryError> {
        let mut organizations = self.organizations.write().await;
        let before = organizations.len();
        organizations.retain(|o| o.id != id);
        if organizations.len() == before {
            return Err(DirectoryError::NotFound(id));
        }
        Ok(())
    }

    async fn list(&self) -> Vec<Organization> {
        self.organizations.read().await.clone()
    }
}
