//! Demo fixture: a three-organization corporate tree, one dashboard account
//! per organization, and a quarter of ledger data for each.
//!
//! The tree exercises every consolidation approach: the holding reports under
//! financial control, its subsidiary under operational control, and the
//! supplier under equity share with zero ownership.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::common::OrganizationId;
use crate::domains::auth::{Role, User, UserDirectory};
use crate::domains::emissions::{EmissionsLedger, NewEmissionEntry, Scope};
use crate::domains::organization::{
    BoundaryApproach, NewOrganization, OrganizationDirectory, OrganizationKind,
    OrganizationPatch, VerificationStatus,
};

/// Ids of the seeded organizations, root first.
#[derive(Debug, Clone, Copy)]
pub struct SeedIds {
    pub holdings: OrganizationId,
    pub subsidiary: OrganizationId,
    pub supplier: OrganizationId,
}

/// Populate the stores with the demo tree, accounts, and ledgers.
pub async fn seed_demo_data(
    directory: &dyn OrganizationDirectory,
    ledger: &dyn EmissionsLedger,
    users: &UserDirectory,
) -> Result<SeedIds> {
    let window = fixture_window()?;

    let holdings = directory
        .create(
            NewOrganization {
                name: "Global Corp Holdings".to_string(),
                kind: OrganizationKind::Site,
                boundary_approach: BoundaryApproach::FinancialControl,
                ownership: None,
                parent_organization_id: None,
                description: None,
                address: "123 Main St, New York, NY".to_string(),
                country: "US".to_string(),
                industry: "Technology".to_string(),
                esg_contact_name: "John Doe".to_string(),
                esg_contact_phone: "+1-555-0123".to_string(),
                esg_contact_email: "john@globalcorp.com".to_string(),
                reporting_year: 2024,
            },
            "system",
        )
        .await;

    let subsidiary = directory
        .create(
            NewOrganization {
                name: "Tech Solutions Inc".to_string(),
                kind: OrganizationKind::Subsidiary,
                boundary_approach: BoundaryApproach::OperationalControl,
                ownership: Some(75.0),
                parent_organization_id: Some(holdings.id),
                description: None,
                address: "456 Tech Ave, San Francisco, CA".to_string(),
                country: "US".to_string(),
                industry: "Software".to_string(),
                esg_contact_name: "Jane Smith".to_string(),
                esg_contact_phone: "+1-555-0124".to_string(),
                esg_contact_email: "jane@techsolutions.com".to_string(),
                reporting_year: 2024,
            },
            "system",
        )
        .await;

    let supplier = directory
        .create(
            NewOrganization {
                name: "Green Manufacturing Co".to_string(),
                kind: OrganizationKind::Supplier,
                boundary_approach: BoundaryApproach::EquityShare,
                ownership: Some(0.0),
                parent_organization_id: Some(holdings.id),
                description: None,
                address: "789 Industrial Blvd, Chicago, IL".to_string(),
                country: "US".to_string(),
                industry: "Manufacturing".to_string(),
                esg_contact_name: "Bob Wilson".to_string(),
                esg_contact_phone: "+1-555-0125".to_string(),
                esg_contact_email: "bob@greenmfg.com".to_string(),
                reporting_year: 2024,
            },
            "system",
        )
        .await;

    // The demo records ship verified; creation always starts unverified.
    for id in [holdings.id, subsidiary.id, supplier.id] {
        directory
            .update(
                id,
                OrganizationPatch {
                    verification_status: Some(VerificationStatus::Verified),
                    ..Default::default()
                },
                "system",
            )
            .await?;
    }

    users
        .insert(User::new(
            "demo@example.com",
            "Demo User",
            holdings.id,
            Role::Root,
            "password123",
        ))
        .await;
    users
        .insert(User::new(
            "subsidiary@example.com",
            "Subsidiary User",
            subsidiary.id,
            Role::Subsidiary,
            "password123",
        ))
        .await;
    users
        .insert(User::new(
            "supplier@example.com",
            "Supplier User",
            supplier.id,
            Role::Supplier,
            "password123",
        ))
        .await;

    // Global Corp Holdings, Q1 2024
    ledger
        .append(
            holdings.id,
            quarterly_entry(
                window,
                Scope::Scope1,
                "stationary",
                "Natural Gas Boilers",
                "Natural Gas Combustion",
                50_000.0,
                "kWh",
                0.2,
                "kgCO2e/kWh",
                "GHG_Protocol",
                "New York HQ",
                "Main Building",
                10_000.0,
            ),
        )
        .await;
    ledger
        .append(
            holdings.id,
            quarterly_entry(
                window,
                Scope::Scope2,
                "electricity",
                "Grid Electricity",
                "Electricity Consumption",
                100_000.0,
                "kWh",
                0.5,
                "kgCO2e/kWh",
                "EPA",
                "New York HQ",
                "All Buildings",
                50_000.0,
            ),
        )
        .await;
    ledger
        .append(
            holdings.id,
            quarterly_entry(
                window,
                Scope::Scope3,
                "business_travel",
                "Air Travel",
                "Business Flights",
                100_000.0,
                "km",
                0.2,
                "kgCO2e/km",
                "DEFRA",
                "Global",
                "N/A",
                20_000.0,
            ),
        )
        .await;

    // Tech Solutions Inc, Q1 2024
    ledger
        .append(
            subsidiary.id,
            quarterly_entry(
                window,
                Scope::Scope1,
                "mobile",
                "Company Vehicles",
                "Vehicle Fleet Operations",
                15_000.0,
                "L",
                2.4,
                "kgCO2e/L",
                "GHG_Protocol",
                "San Francisco",
                "Vehicle Fleet",
                36_000.0,
            ),
        )
        .await;
    ledger
        .append(
            subsidiary.id,
            quarterly_entry(
                window,
                Scope::Scope2,
                "electricity",
                "Grid Electricity",
                "Data Center Operations",
                200_000.0,
                "kWh",
                0.4,
                "kgCO2e/kWh",
                "EPA",
                "San Francisco",
                "Data Center",
                80_000.0,
            ),
        )
        .await;
    ledger
        .append(
            subsidiary.id,
            quarterly_entry(
                window,
                Scope::Scope3,
                "employee_commuting",
                "Employee Transport",
                "Daily Commute",
                50_000.0,
                "km",
                0.1,
                "kgCO2e/km",
                "DEFRA",
                "San Francisco",
                "Office Building",
                5_000.0,
            ),
        )
        .await;

    // Green Manufacturing Co, Q1 2024
    ledger
        .append(
            supplier.id,
            quarterly_entry(
                window,
                Scope::Scope1,
                "process",
                "Manufacturing Process",
                "Industrial Processing",
                300_000.0,
                "kWh",
                0.3,
                "kgCO2e/kWh",
                "GHG_Protocol",
                "Chicago",
                "Manufacturing Plant",
                90_000.0,
            ),
        )
        .await;
    ledger
        .append(
            supplier.id,
            quarterly_entry(
                window,
                Scope::Scope2,
                "electricity",
                "Grid Electricity",
                "Factory Operations",
                500_000.0,
                "kWh",
                0.6,
                "kgCO2e/kWh",
                "EPA",
                "Chicago",
                "Factory Complex",
                300_000.0,
            ),
        )
        .await;
    ledger
        .append(
            supplier.id,
            quarterly_entry(
                window,
                Scope::Scope3,
                "waste",
                "Industrial Waste",
                "Waste Processing",
                10_000.0,
                "t",
                0.5,
                "kgCO2e/t",
                "DEFRA",
                "Chicago",
                "Manufacturing Plant",
                5_000.0,
            ),
        )
        .await;
    ledger
        .append(
            supplier.id,
            quarterly_entry(
                window,
                Scope::Scope3,
                "transportation",
                "Product Distribution",
                "Logistics",
                200_000.0,
                "km",
                0.1,
                "kgCO2e/km",
                "GHG_Protocol",
                "Chicago",
                "Distribution Center",
                20_000.0,
            ),
        )
        .await;

    tracing::info!(
        holdings = %holdings.id,
        subsidiary = %subsidiary.id,
        supplier = %supplier.id,
        "seeded demo organizations, accounts, and ledgers"
    );

    Ok(SeedIds {
        holdings: holdings.id,
        subsidiary: subsidiary.id,
        supplier: supplier.id,
    })
}

/// A verified Q1-2024 entry. Totals come from the fixture as stored values,
/// not derived ones, mirroring how real ledgers keep their booked numbers.
#[allow(clippy::too_many_arguments)]
fn quarterly_entry(
    window: (NaiveDate, NaiveDate),
    scope: Scope,
    category: &str,
    source: &str,
    activity: &str,
    quantity: f64,
    unit: &str,
    emission_factor: f64,
    emission_factor_unit: &str,
    emission_factor_source: &str,
    location: &str,
    facility: &str,
    calculated_emissions: f64,
) -> NewEmissionEntry {
    NewEmissionEntry {
        scope,
        category: category.to_string(),
        source: source.to_string(),
        activity: activity.to_string(),
        fuel_type: None,
        quantity,
        unit: unit.to_string(),
        emission_factor,
        emission_factor_unit: emission_factor_unit.to_string(),
        emission_factor_source: emission_factor_source.to_string(),
        start_date: window.0,
        end_date: window.1,
        location: location.to_string(),
        facility: facility.to_string(),
        notes: None,
        calculated_emissions: Some(calculated_emissions),
        verification_status: Some(VerificationStatus::Verified),
        verified_by: None,
        verification_date: None,
        uncertainty_range: None,
    }
}

fn fixture_window() -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("fixture window start")?;
    let end = NaiveDate::from_ymd_opt(2024, 3, 31).context("fixture window end")?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::emissions::{aggregate, InMemoryEmissionsLedger};
    use crate::domains::organization::InMemoryOrganizationDirectory;

    async fn seeded() -> (
        InMemoryOrganizationDirectory,
        InMemoryEmissionsLedger,
        UserDirectory,
        SeedIds,
    ) {
        let directory = InMemoryOrganizationDirectory::new();
        let ledger = InMemoryEmissionsLedger::new();
        let users = UserDirectory::new();
        let ids = seed_demo_data(&directory, &ledger, &users)
            .await
            .expect("seeding cannot fail on empty stores");
        (directory, ledger, users, ids)
    }

    #[tokio::test]
    async fn test_seed_builds_the_demo_tree() {
        let (directory, _, _, ids) = seeded().await;

        let all = directory.list().await;
        assert_eq!(all.len(), 3);

        let holdings = directory.get(ids.holdings).await.unwrap();
        assert_eq!(holdings.name, "Global Corp Holdings");
        assert_eq!(holdings.parent_organization_id, None);
        assert_eq!(holdings.verification_status, VerificationStatus::Verified);

        let subsidiary = directory.get(ids.subsidiary).await.unwrap();
        assert_eq!(subsidiary.parent_organization_id, Some(ids.holdings));
        assert_eq!(subsidiary.ownership, Some(75.0));

        let supplier = directory.get(ids.supplier).await.unwrap();
        assert_eq!(supplier.parent_organization_id, Some(ids.holdings));
        assert_eq!(supplier.ownership, Some(0.0));
    }

    #[tokio::test]
    async fn test_seed_populates_ledgers_and_accounts() {
        let (_, ledger, users, ids) = seeded().await;

        assert_eq!(ledger.list_by_organization(ids.holdings).await.len(), 3);
        assert_eq!(ledger.list_by_organization(ids.subsidiary).await.len(), 3);
        assert_eq!(ledger.list_by_organization(ids.supplier).await.len(), 4);

        for email in [
            "demo@example.com",
            "subsidiary@example.com",
            "supplier@example.com",
        ] {
            let user = users.find_by_email(email).await;
            assert!(user.is_some(), "expected demo account {email}");
            assert!(user.unwrap().verify_password("password123"));
        }
    }

    #[tokio::test]
    async fn test_seed_consolidates_to_known_totals() {
        let (directory, ledger, _, ids) = seeded().await;

        // Financial control: the 75%-owned subsidiary is consolidated in
        // full, the 0%-owned supplier is excluded.
        let group = aggregate(&directory, &ledger, ids.holdings, true)
            .await
            .unwrap();
        assert_eq!(group.scope1_total, 46_000.0);
        assert_eq!(group.scope2_total, 130_000.0);
        assert_eq!(group.scope3_total, 25_000.0);
        assert_eq!(group.total, 201_000.0);

        let own = aggregate(&directory, &ledger, ids.holdings, false)
            .await
            .unwrap();
        assert_eq!(own.total, 80_000.0);
    }
}
