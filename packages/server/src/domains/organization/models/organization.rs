use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::OrganizationId;

/// Organization - a reporting unit in the corporate hierarchy
///
/// Hierarchy is expressed through `parent_organization_id` alone; the
/// directory enforces no referential integrity, so a parent may be deleted
/// while children still point at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OrganizationKind,
    pub boundary_approach: BoundaryApproach,
    /// Parent's ownership share in percent (0-100). Absent for roots and
    /// wholly independent units; consolidation treats absent as 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_organization_id: Option<OrganizationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub country: String,
    pub industry: String,
    pub esg_contact_name: String,
    pub esg_contact_phone: String,
    pub esg_contact_email: String,
    pub reporting_year: i32,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

/// Role of an organization within the reporting structure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationKind {
    Site,
    Subsidiary,
    Supplier,
}

impl OrganizationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::Subsidiary => "subsidiary",
            Self::Supplier => "supplier",
        }
    }
}

/// GHG Protocol consolidation approach used when this organization reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryApproach {
    FinancialControl,
    OperationalControl,
    EquityShare,
}

impl BoundaryApproach {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FinancialControl => "financial_control",
            Self::OperationalControl => "operational_control",
            Self::EquityShare => "equity_share",
        }
    }
}

/// Third-party verification state, shared by organizations and ledger entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Unverified,
    Verified,
    Pending,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Verified => "verified",
            Self::Pending => "pending",
        }
    }
}

/// Input for creating an organization
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganization {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OrganizationKind,
    pub boundary_approach: BoundaryApproach,
    #[serde(default)]
    pub ownership: Option<f64>,
    #[serde(default)]
    pub parent_organization_id: Option<OrganizationId>,
    #[serde(default)]
    pub description: Option<String>,
    pub address: String,
    pub country: String,
    pub industry: String,
    pub esg_contact_name: String,
    pub esg_contact_phone: String,
    pub esg_contact_email: String,
    pub reporting_year: i32,
}

/// Partial update for an organization. Absent fields keep their values;
/// optional fields cannot be cleared back to null through a patch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<OrganizationKind>,
    pub boundary_approach: Option<BoundaryApproach>,
    pub ownership: Option<f64>,
    pub parent_organization_id: Option<OrganizationId>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub industry: Option<String>,
    pub esg_contact_name: Option<String>,
    pub esg_contact_phone: Option<String>,
    pub esg_contact_email: Option<String>,
    pub reporting_year: Option<i32>,
    pub verification_status: Option<VerificationStatus>,
}

impl Organization {
    /// Build a freshly created organization, stamping audit fields.
    ///
    /// New organizations always start unverified.
    pub fn create(input: NewOrganization, created_by: &str) -> Self {
        let now = Utc::now();
        Self {
            id: OrganizationId::new(),
            name: input.name,
            kind: input.kind,
            boundary_approach: input.boundary_approach,
            ownership: input.ownership,
            parent_organization_id: input.parent_organization_id,
            description: input.description,
            address: input.address,
            country: input.country,
            industry: input.industry,
            esg_contact_name: input.esg_contact_name,
            esg_contact_phone: input.esg_contact_phone,
            esg_contact_email: input.esg_contact_email,
            reporting_year: input.reporting_year,
            verification_status: VerificationStatus::Unverified,
            created_at: now,
            updated_at: now,
            created_by: created_by.to_string(),
            updated_by: created_by.to_string(),
        }
    }

    /// Merge a patch into this record, overwriting only the provided fields.
    pub fn apply(&mut self, patch: OrganizationPatch, updated_by: &str) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(approach) = patch.boundary_approach {
            self.boundary_approach = approach;
        }
        if let Some(ownership) = patch.ownership {
            self.ownership = Some(ownership);
        }
        if let Some(parent) = patch.parent_organization_id {
            self.parent_organization_id = Some(parent);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(country) = patch.country {
            self.country = country;
        }
        if let Some(industry) = patch.industry {
            self.industry = industry;
        }
        if let Some(name) = patch.esg_contact_name {
            self.esg_contact_name = name;
        }
        if let Some(phone) = patch.esg_contact_phone {
            self.esg_contact_phone = phone;
        }
        if let Some(email) = patch.esg_contact_email {
            self.esg_contact_email = email;
        }
        if let Some(year) = patch.reporting_year {
            self.reporting_year = year;
        }
        if let Some(status) = patch.verification_status {
            self.verification_status = status;
        }
        self.updated_at = Utc::now();
        self.updated_by = updated_by.to_string();
    }
}
