use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::OrganizationId;
use crate::domains::organization::VerificationStatus;

/// GHG Protocol emission scope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Scope1,
    Scope2,
    Scope3,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scope1 => "scope1",
            Self::Scope2 => "scope2",
            Self::Scope3 => "scope3",
        }
    }
}

/// Ledger entry identifier, shaped `{organization-id}-{n}` where `n` is the
/// 1-based position of the entry within that organization's ledger.
///
/// Positions are assigned from the current ledger length at append time, so
/// ids stay dense and predictable for an append-only ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn derive(organization_id: OrganizationId, position: usize) -> Self {
        Self(format!("{organization_id}-{position}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// EmissionEntry - one recorded activity in an organization's ledger
///
/// `calculated_emissions` (kgCO2e) is stored at append time, never derived on
/// read: aggregation must keep working even if factors are later revised.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionEntry {
    pub id: EntryId,
    pub scope: Scope,
    pub category: String,
    pub source: String,
    pub activity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub emission_factor: f64,
    pub emission_factor_unit: String,
    pub emission_factor_source: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub facility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub calculated_emissions: f64,
    pub verification_status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty_range: Option<f64>,
}

/// Input for appending a ledger entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmissionEntry {
    pub scope: Scope,
    pub category: String,
    pub source: String,
    pub activity: String,
    #[serde(default)]
    pub fuel_type: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub emission_factor: f64,
    pub emission_factor_unit: String,
    pub emission_factor_source: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub facility: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Precomputed total in kgCO2e. When absent the ledger computes
    /// `quantity * emission_factor`.
    #[serde(default)]
    pub calculated_emissions: Option<f64>,
    #[serde(default)]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default)]
    pub verified_by: Option<String>,
    #[serde(default)]
    pub verification_date: Option<NaiveDate>,
    #[serde(default)]
    pub uncertainty_range: Option<f64>,
}

impl EmissionEntry {
    /// Materialize a ledger entry from its input under an assigned id.
    pub fn record(id: EntryId, input: NewEmissionEntry) -> Self {
        let calculated_emissions = input
            .calculated_emissions
            .unwrap_or(input.quantity * input.emission_factor);
        Self {
            id,
            scope: input.scope,
            category: input.category,
            source: input.source,
            activity: input.activity,
            fuel_type: input.fuel_type,
            quantity: input.quantity,
            unit: input.unit,
            emission_factor: input.emission_factor,
            emission_factor_unit: input.emission_factor_unit,
            emission_factor_source: input.emission_factor_source,
            start_date: input.start_date,
            end_date: input.end_date,
            location: input.location,
            facility: input.facility,
            notes: input.notes,
            calculated_emissions,
            verification_status: input
                .verification_status
                .unwrap_or(VerificationStatus::Unverified),
            verified_by: input.verified_by,
            verification_date: input.verification_date,
            uncertainty_range: input.uncertainty_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> NewEmissionEntry {
        NewEmissionEntry {
            scope: Scope::Scope1,
            category: "stationary".to_string(),
            source: "Natural Gas Boilers".to_string(),
            activity: "Natural Gas Combustion".to_string(),
            fuel_type: Some("Natural Gas".to_string()),
            quantity: 50_000.0,
            unit: "kWh".to_string(),
            emission_factor: 0.2,
            emission_factor_unit: "kgCO2e/kWh".to_string(),
            emission_factor_source: "GHG_Protocol".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            location: "Hamburg".to_string(),
            facility: "Plant 1".to_string(),
            notes: None,
            calculated_emissions: None,
            verification_status: None,
            verified_by: None,
            verification_date: None,
            uncertainty_range: None,
        }
    }

    #[test]
    fn test_record_computes_missing_total() {
        let id = EntryId::derive(OrganizationId::new(), 1);
        let entry = EmissionEntry::record(id, sample_input());
        assert_eq!(entry.calculated_emissions, 10_000.0);
        assert_eq!(entry.verification_status, VerificationStatus::Unverified);
    }

    #[test]
    fn test_record_trusts_supplied_total() {
        let mut input = sample_input();
        input.calculated_emissions = Some(9_500.0);
        let entry = EmissionEntry::record(EntryId::derive(OrganizationId::new(), 1), input);
        assert_eq!(entry.calculated_emissions, 9_500.0);
    }

    #[test]
    fn test_entry_id_shape() {
        let org = OrganizationId::new();
        let id = EntryId::derive(org, 3);
        assert_eq!(id.as_str(), format!("{org}-3"));
    }

    #[test]
    fn test_scope_wire_values() {
        assert_eq!(serde_json::to_string(&Scope::Scope1).unwrap(), "\"scope1\"");
        assert_eq!(serde_json::to_string(&Scope::Scope3).unwrap(), "\"scope3\"");
        assert!(serde_json::from_str::<Scope>("\"scope4\"").is_err());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let entry = EmissionEntry::record(
            EntryId::derive(OrganizationId::new(), 1),
            sample_input(),
        );
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["scope"], "scope1");
        assert_eq!(json["emissionFactorSource"], "GHG_Protocol");
        assert_eq!(json["calculatedEmissions"], 10_000.0);
        assert_eq!(json["startDate"], "2024-01-01");
        assert!(json.get("notes").is_none());
    }
}
