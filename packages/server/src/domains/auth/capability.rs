//! Access gate: which organizations an account may touch.
//!
//! Root accounts operate on the whole directory. Subsidiary and supplier
//! accounts are confined to their home organization.

use crate::common::OrganizationId;

use super::models::Role;

/// Whether `role` at `subject` may read or modify `target`'s directory
/// record.
pub fn can_access_organization(
    role: Role,
    subject: OrganizationId,
    target: OrganizationId,
) -> bool {
    match role {
        Role::Root => true,
        Role::Subsidiary | Role::Supplier => subject == target,
    }
}

/// Whether `role` at `subject` may read or append `target`'s emission
/// ledger.
///
/// Same rule as directory access today; kept separate so ledger permissions
/// can diverge without touching directory checks.
pub fn can_access_emissions(role: Role, subject: OrganizationId, target: OrganizationId) -> bool {
    match role {
        Role::Root => true,
        Role::Subsidiary | Role::Supplier => subject == target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_reaches_every_organization() {
        let home = OrganizationId::new();
        let other = OrganizationId::new();

        assert!(can_access_organization(Role::Root, home, other));
        assert!(can_access_emissions(Role::Root, home, other));
    }

    #[test]
    fn test_subsidiary_confined_to_home_organization() {
        let home = OrganizationId::new();
        let other = OrganizationId::new();

        assert!(can_access_organization(Role::Subsidiary, home, home));
        assert!(!can_access_organization(Role::Subsidiary, home, other));
        assert!(can_access_emissions(Role::Subsidiary, home, home));
        assert!(!can_access_emissions(Role::Subsidiary, home, other));
    }

    #[test]
    fn test_supplier_confined_to_home_organization() {
        let home = OrganizationId::new();
        let other = OrganizationId::new();

        assert!(can_access_organization(Role::Supplier, home, home));
        assert!(!can_access_organization(Role::Supplier, home, other));
        assert!(can_access_emissions(Role::Supplier, home, home));
        assert!(!can_access_emissions(Role::Supplier, home, other));
    }
}
