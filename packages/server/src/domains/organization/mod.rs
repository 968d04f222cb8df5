// Organization domain - the corporate directory
//
// Responsibilities:
// - CRUD over reporting units (sites, subsidiaries, suppliers)
// - Parent/child hierarchy via parent_organization_id
// - GHG Protocol boundary approach per organization

pub mod directory;
pub mod models;

pub use directory::{DirectoryError, InMemoryOrganizationDirectory, OrganizationDirectory};
pub use models::*;
