//! Request validation, run in handlers before any store call.
//!
//! Rules mirror the dashboard's form schemas, so the API rejects exactly what
//! the forms would. Field names in violations use the wire spelling. Date
//! presence and format are already enforced by deserialization.

use crate::domains::emissions::NewEmissionEntry;
use crate::domains::organization::{NewOrganization, OrganizationPatch};

use super::error::{ApiError, FieldViolation};

#[derive(Debug, Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    fn require_chars(&mut self, field: &str, value: &str, min: usize) {
        if value.trim().chars().count() < min {
            if min > 1 {
                self.push(field, format!("must be at least {min} characters"));
            } else {
                self.push(field, "is required");
            }
        }
    }

    fn require_positive(&mut self, field: &str, value: f64) {
        // Written as a negated comparison so NaN fails too.
        if !(value > 0.0) {
            self.push(field, "must be positive");
        }
    }

    fn finish(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.0))
        }
    }
}

fn is_valid_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

fn check_ownership(violations: &mut Violations, ownership: f64) {
    if !(0.0..=100.0).contains(&ownership) {
        violations.push("ownership", "must be between 0 and 100");
    }
}

fn check_reporting_year(violations: &mut Violations, year: i32) {
    if !(2000..=2100).contains(&year) {
        violations.push("reportingYear", "must be between 2000 and 2100");
    }
}

pub fn validate_new_organization(input: &NewOrganization) -> Result<(), ApiError> {
    let mut violations = Violations::default();

    violations.require_chars("name", &input.name, 2);
    violations.require_chars("address", &input.address, 5);
    violations.require_chars("country", &input.country, 2);
    violations.require_chars("industry", &input.industry, 2);
    violations.require_chars("esgContactName", &input.esg_contact_name, 2);
    violations.require_chars("esgContactPhone", &input.esg_contact_phone, 5);
    if !is_valid_email(&input.esg_contact_email) {
        violations.push("esgContactEmail", "must be a valid email address");
    }
    check_reporting_year(&mut violations, input.reporting_year);
    if let Some(ownership) = input.ownership {
        check_ownership(&mut violations, ownership);
    }

    violations.finish()
}

/// Patches validate only the fields they carry.
pub fn validate_organization_patch(patch: &OrganizationPatch) -> Result<(), ApiError> {
    let mut violations = Violations::default();

    if let Some(name) = &patch.name {
        violations.require_chars("name", name, 2);
    }
    if let Some(address) = &patch.address {
        violations.require_chars("address", address, 5);
    }
    if let Some(country) = &patch.country {
        violations.require_chars("country", country, 2);
    }
    if let Some(industry) = &patch.industry {
        violations.require_chars("industry", industry, 2);
    }
    if let Some(name) = &patch.esg_contact_name {
        violations.require_chars("esgContactName", name, 2);
    }
    if let Some(phone) = &patch.esg_contact_phone {
        violations.require_chars("esgContactPhone", phone, 5);
    }
    if let Some(email) = &patch.esg_contact_email {
        if !is_valid_email(email) {
            violations.push("esgContactEmail", "must be a valid email address");
        }
    }
    if let Some(year) = patch.reporting_year {
        check_reporting_year(&mut violations, year);
    }
    if let Some(ownership) = patch.ownership {
        check_ownership(&mut violations, ownership);
    }

    violations.finish()
}

pub fn validate_new_entry(input: &NewEmissionEntry) -> Result<(), ApiError> {
    let mut violations = Violations::default();

    violations.require_chars("category", &input.category, 1);
    violations.require_chars("source", &input.source, 1);
    violations.require_chars("activity", &input.activity, 1);
    violations.require_positive("quantity", input.quantity);
    violations.require_chars("unit", &input.unit, 1);
    violations.require_positive("emissionFactor", input.emission_factor);
    violations.require_chars("emissionFactorUnit", &input.emission_factor_unit, 1);
    violations.require_chars("emissionFactorSource", &input.emission_factor_source, 1);
    violations.require_chars("location", &input.location, 1);
    violations.require_chars("facility", &input.facility, 1);

    violations.finish()
}
