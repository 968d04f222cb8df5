//! GHG Protocol consolidation engine.
//!
//! Computes per-scope totals for a reporting organization, optionally folding
//! in children according to the organization's boundary approach:
//!
//! - `financial_control`: children join only with ownership strictly above
//!   50%, at full weight. Exactly 50% stays out.
//! - `operational_control`: every direct child joins at full weight,
//!   regardless of ownership.
//! - `equity_share`: every direct child joins, weighted by `ownership / 100`.
//!   Absent ownership weighs 0.
//!
//! The reporting organization's own entries always carry full weight; scaling
//! applies to descendant contributions only. All arithmetic is plain f64 over
//! stored `calculated_emissions` values, folded in directory order, so a
//! repeated call over unchanged stores returns bit-identical totals.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::OrganizationId;
use crate::domains::organization::{BoundaryApproach, Organization, OrganizationDirectory};

use super::ledger::EmissionsLedger;
use super::models::Scope;

/// Errors from consolidation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// The organization whose totals were requested does not exist.
    #[error("organization {0} not found")]
    OrganizationNotFound(OrganizationId),
}

/// Consolidated totals for one reporting organization, in kgCO2e.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedEmissions {
    pub scope1_total: f64,
    pub scope2_total: f64,
    pub scope3_total: f64,
    pub total: f64,
}

/// Running per-scope sums. `total` is derived once at the end so it is the
/// exact floating-point sum of the three published buckets.
#[derive(Debug, Default, Clone, Copy)]
struct ScopeTotals {
    scope1: f64,
    scope2: f64,
    scope3: f64,
}

impl ScopeTotals {
    fn add(&mut self, scope: Scope, amount: f64) {
        match scope {
            Scope::Scope1 => self.scope1 += amount,
            Scope::Scope2 => self.scope2 += amount,
            Scope::Scope3 => self.scope3 += amount,
        }
    }

    fn consolidate(self) -> AggregatedEmissions {
        AggregatedEmissions {
            scope1_total: self.scope1,
            scope2_total: self.scope2,
            scope3_total: self.scope3,
            total: self.scope1 + self.scope2 + self.scope3,
        }
    }
}

/// Whether a child joins its parent's consolidation, and at what weight.
fn child_weight(approach: BoundaryApproach, child: &Organization) -> Option<f64> {
    let ownership = child.ownership.unwrap_or(0.0);
    match approach {
        BoundaryApproach::FinancialControl => (ownership > 50.0).then_some(1.0),
        BoundaryApproach::OperationalControl => Some(1.0),
        BoundaryApproach::EquityShare => Some(ownership / 100.0),
    }
}

/// Consolidate one organization, optionally with its direct children.
///
/// Only one hierarchy level is folded in: grandchildren are the concern of
/// [`aggregate_rollup`]. With `include_descendants == false` the result is
/// the plain, unweighted sum of the organization's own ledger.
pub async fn aggregate(
    directory: &dyn OrganizationDirectory,
    ledger: &dyn EmissionsLedger,
    organization_id: OrganizationId,
    include_descendants: bool,
) -> Result<AggregatedEmissions, AggregationError> {
    let snapshot = directory.list().await;
    let root = snapshot
        .iter()
        .find(|o| o.id == organization_id)
        .ok_or(AggregationError::OrganizationNotFound(organization_id))?;

    // (organization, weight) pairs contributing to the consolidated figure.
    // The reporting organization itself always carries full weight.
    let mut contributors: Vec<(&Organization, f64)> = vec![(root, 1.0)];

    if include_descendants {
        for child in snapshot
            .iter()
            .filter(|o| o.parent_organization_id == Some(root.id))
        {
            if let Some(weight) = child_weight(root.boundary_approach, child) {
                contributors.push((child, weight));
            }
        }
    }

    let mut totals = ScopeTotals::default();
    for (org, weight) in contributors {
        for entry in ledger.list_by_organization(org.id).await {
            totals.add(entry.scope, entry.calculated_emissions * weight);
        }
    }
    Ok(totals.consolidate())
}

/// Consolidate an organization's entire subtree.
///
/// Walks the hierarchy depth-first under the reporting organization's own
/// boundary approach, carrying the ownership-weight product down each branch:
/// a 50%-owned child of a 50%-owned child contributes at 25% under
/// equity share. Under financial control, a subtree is pruned as soon as an
/// ownership link fails the majority test.
///
/// Each organization is counted at most once; the visited set doubles as the
/// cycle guard for corrupted parent links.
pub async fn aggregate_rollup(
    directory: &dyn OrganizationDirectory,
    ledger: &dyn EmissionsLedger,
    organization_id: OrganizationId,
) -> Result<AggregatedEmissions, AggregationError> {
    let snapshot = directory.list().await;
    let root = snapshot
        .iter()
        .find(|o| o.id == organization_id)
        .ok_or(AggregationError::OrganizationNotFound(organization_id))?;

    let mut children: HashMap<OrganizationId, Vec<&Organization>> = HashMap::new();
    for org in &snapshot {
        if let Some(parent) = org.parent_organization_id {
            children.entry(parent).or_default().push(org);
        }
    }

    let mut visited: HashSet<OrganizationId> = HashSet::new();
    let mut stack: Vec<(&Organization, f64)> = vec![(root, 1.0)];
    let mut totals = ScopeTotals::default();

    while let Some((org, weight)) = stack.pop() {
        if !visited.insert(org.id) {
            continue;
        }
        for entry in ledger.list_by_organization(org.id).await {
            totals.add(entry.scope, entry.calculated_emissions * weight);
        }
        for &child in children.get(&org.id).into_iter().flatten() {
            if let Some(child_factor) = child_weight(root.boundary_approach, child) {
                stack.push((child, weight * child_factor));
            }
        }
    }

    Ok(totals.consolidate())
}
