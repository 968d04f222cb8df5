//! Emissions ledger - append-only activity records keyed by organization.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::common::OrganizationId;

use super::models::{EmissionEntry, EntryId, NewEmissionEntry};

/// Repository seam for the emissions ledger.
#[async_trait]
pub trait EmissionsLedger: Send + Sync {
    /// All entries recorded for one organization, oldest first.
    /// Unknown organizations yield an empty list, never an error.
    async fn list_by_organization(&self, organization_id: OrganizationId) -> Vec<EmissionEntry>;

    /// Append an entry to an organization's ledger and return the stored
    /// record with its assigned id.
    ///
    /// The organization is not required to exist in the directory; the ledger
    /// opens a sequence for any id it is handed.
    async fn append(
        &self,
        organization_id: OrganizationId,
        input: NewEmissionEntry,
    ) -> EmissionEntry;
}

/// In-memory ledger; each organization's entries keep append order.
#[derive(Clone, Default)]
pub struct InMemoryEmissionsLedger {
    entries: Arc<RwLock<HashMap<OrganizationId, Vec<EmissionEntry>>>>,
}

impl InMemoryEmissionsLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmissionsLedger for InMemoryEmissionsLedger {
    async fn list_by_organization(&self, organization_id: OrganizationId) -> Vec<EmissionEntry> {
        let entries = self.entries.read().await;
        entries.get(&organization_id).cloned().unwrap_or_default()
    }

    async fn append(
        &self,
        organization_id: OrganizationId,
        input: NewEmissionEntry,
    ) -> EmissionEntry {
        let mut entries = self.entries.write().await;
        let ledger = entries.entry(organization_id).or_default();
        // Id assignment and insertion happen under one write lock, so
        // concurrent appends cannot race the position counter.
        let id = EntryId::derive(organization_id, ledger.len() + 1);
        let entry = EmissionEntry::record(id, input);
        ledger.push(entry.clone());
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::emissions::models::Scope;
    use chrono::NaiveDate;

    fn input(scope: Scope, quantity: f64, factor: f64) -> NewEmissionEntry {
        NewEmissionEntry {
            scope,
            category: "electricity".to_string(),
            source: "Grid Electricity".to_string(),
            activity: "Purchased Electricity".to_string(),
            fuel_type: None,
            quantity,
            unit: "kWh".to_string(),
            emission_factor: factor,
            emission_factor_unit: "kgCO2e/kWh".to_string(),
            emission_factor_source: "EPA".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            location: "Austin".to_string(),
            facility: "HQ".to_string(),
            notes: None,
            calculated_emissions: None,
            verification_status: None,
            verified_by: None,
            verification_date: None,
            uncertainty_range: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_organization_lists_empty() {
        let ledger = InMemoryEmissionsLedger::new();
        let entries = ledger.list_by_organization(OrganizationId::new()).await;
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_append_assigns_sequential_ids() {
        let ledger = InMemoryEmissionsLedger::new();
        let org = OrganizationId::new();

        let first = ledger.append(org, input(Scope::Scope2, 100.0, 0.5)).await;
        let second = ledger.append(org, input(Scope::Scope2, 200.0, 0.5)).await;

        assert_eq!(first.id.as_str(), format!("{org}-1"));
        assert_eq!(second.id.as_str(), format!("{org}-2"));
    }

    #[tokio::test]
    async fn test_sequences_are_per_organization() {
        let ledger = InMemoryEmissionsLedger::new();
        let a = OrganizationId::new();
        let b = OrganizationId::new();

        ledger.append(a, input(Scope::Scope1, 1.0, 1.0)).await;
        let b_first = ledger.append(b, input(Scope::Scope1, 1.0, 1.0)).await;

        assert_eq!(b_first.id.as_str(), format!("{b}-1"));
    }

    #[tokio::test]
    async fn test_list_preserves_append_order() {
        let ledger = InMemoryEmissionsLedger::new();
        let org = OrganizationId::new();

        ledger.append(org, input(Scope::Scope1, 10.0, 1.0)).await;
        ledger.append(org, input(Scope::Scope2, 20.0, 1.0)).await;
        ledger.append(org, input(Scope::Scope3, 30.0, 1.0)).await;

        let quantities: Vec<f64> = ledger
            .list_by_organization(org)
            .await
            .into_iter()
            .map(|e| e.quantity)
            .collect();
        assert_eq!(quantities, vec![10.0, 20.0, 30.0]);
    }

    #[tokio::test]
    async fn test_append_does_not_require_directory_entry() {
        // Ledger accepts ids the directory has never seen
        let ledger = InMemoryEmissionsLedger::new();
        let ghost = OrganizationId::new();
        let entry = ledger.append(ghost, input(Scope::Scope3, 5.0, 2.0)).await;
        assert_eq!(entry.calculated_emissions, 10.0);
    }
}
