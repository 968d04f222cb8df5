//! Built-in reference data: GHG Protocol reporting categories, accepted
//! measurement units, and published emission factors.
//!
//! Factors follow GHG Protocol, EPA, and DEFRA published figures. `Custom`
//! and `IPCC` are accepted as factor sources on ledger entries but carry no
//! published rows here.

use serde::Serialize;

use super::models::Scope;

/// One reporting category as defined by the GHG Protocol.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmissionCategory {
    pub id: &'static str,
    pub scope: Scope,
    pub name: &'static str,
    pub description: &'static str,
}

pub const EMISSION_CATEGORIES: &[EmissionCategory] = &[
    // Scope 1
    EmissionCategory {
        id: "stationary",
        scope: Scope::Scope1,
        name: "Stationary Combustion",
        description: "Emissions from stationary sources like boilers, furnaces, etc.",
    },
    EmissionCategory {
        id: "mobile",
        scope: Scope::Scope1,
        name: "Mobile Combustion",
        description: "Emissions from vehicles and mobile machinery",
    },
    EmissionCategory {
        id: "fugitive",
        scope: Scope::Scope1,
        name: "Fugitive Emissions",
        description: "Leaks from refrigeration and AC systems",
    },
    EmissionCategory {
        id: "process",
        scope: Scope::Scope1,
        name: "Process Emissions",
        description: "Emissions from industrial processes",
    },
    // Scope 2
    EmissionCategory {
        id: "electricity",
        scope: Scope::Scope2,
        name: "Purchased Electricity",
        description: "Grid electricity consumption",
    },
    EmissionCategory {
        id: "steam",
        scope: Scope::Scope2,
        name: "Purchased Steam",
        description: "Steam, heating, and cooling",
    },
    // Scope 3
    EmissionCategory {
        id: "purchased_goods",
        scope: Scope::Scope3,
        name: "Purchased Goods & Services",
        description: "Upstream emissions from purchased goods",
    },
    EmissionCategory {
        id: "capital_goods",
        scope: Scope::Scope3,
        name: "Capital Goods",
        description: "Production of capital goods",
    },
    EmissionCategory {
        id: "fuel_energy",
        scope: Scope::Scope3,
        name: "Fuel & Energy Activities",
        description: "Not included in Scope 1 or 2",
    },
    EmissionCategory {
        id: "transportation",
        scope: Scope::Scope3,
        name: "Transportation & Distribution",
        description: "Upstream and downstream transportation",
    },
    EmissionCategory {
        id: "waste",
        scope: Scope::Scope3,
        name: "Waste Generated",
        description: "Disposal and treatment of waste",
    },
    EmissionCategory {
        id: "business_travel",
        scope: Scope::Scope3,
        name: "Business Travel",
        description: "Employee business travel",
    },
    EmissionCategory {
        id: "employee_commuting",
        scope: Scope::Scope3,
        name: "Employee Commuting",
        description: "Employee commuting to work",
    },
    EmissionCategory {
        id: "leased_assets",
        scope: Scope::Scope3,
        name: "Leased Assets",
        description: "Operation of leased assets",
    },
    EmissionCategory {
        id: "investments",
        scope: Scope::Scope3,
        name: "Investments",
        description: "Investment-related emissions",
    },
];

/// A unit accepted on ledger entries.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MeasurementUnit {
    pub value: &'static str,
    pub label: &'static str,
}

pub const EMISSION_UNITS: &[MeasurementUnit] = &[
    // Energy
    MeasurementUnit { value: "kWh", label: "Kilowatt Hours (kWh)" },
    MeasurementUnit { value: "MWh", label: "Megawatt Hours (MWh)" },
    MeasurementUnit { value: "GJ", label: "Gigajoules (GJ)" },
    // Volume
    MeasurementUnit { value: "L", label: "Liters (L)" },
    MeasurementUnit { value: "m3", label: "Cubic Meters (m³)" },
    MeasurementUnit { value: "gal", label: "Gallons (gal)" },
    // Mass
    MeasurementUnit { value: "kg", label: "Kilograms (kg)" },
    MeasurementUnit { value: "t", label: "Metric Tonnes (t)" },
    MeasurementUnit { value: "lbs", label: "Pounds (lbs)" },
    // Distance
    MeasurementUnit { value: "km", label: "Kilometers (km)" },
    MeasurementUnit { value: "miles", label: "Miles" },
];

/// A recognised factor publisher.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FactorSource {
    pub value: &'static str,
    pub label: &'static str,
}

pub const EMISSION_FACTOR_SOURCES: &[FactorSource] = &[
    FactorSource { value: "GHG_Protocol", label: "GHG Protocol" },
    FactorSource { value: "EPA", label: "US EPA" },
    FactorSource { value: "DEFRA", label: "UK DEFRA" },
    FactorSource { value: "IPCC", label: "IPCC" },
    FactorSource { value: "Custom", label: "Custom Factor" },
];

/// A published emission factor for a (category, source, publisher) triple.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedFactor {
    pub category: &'static str,
    pub source: &'static str,
    pub publisher: &'static str,
    pub factor: f64,
    pub unit: &'static str,
}

macro_rules! factor {
    ($category:literal, $source:literal, $publisher:literal, $factor:literal, $unit:literal) => {
        PublishedFactor {
            category: $category,
            source: $source,
            publisher: $publisher,
            factor: $factor,
            unit: $unit,
        }
    };
}

pub const PUBLISHED_FACTORS: &[PublishedFactor] = &[
    // Scope 1 - stationary combustion
    factor!("stationary", "Natural Gas", "GHG_Protocol", 0.202, "kgCO2e/kWh"),
    factor!("stationary", "Natural Gas", "EPA", 0.181, "kgCO2e/kWh"),
    factor!("stationary", "Natural Gas", "DEFRA", 0.204, "kgCO2e/kWh"),
    factor!("stationary", "Diesel", "GHG_Protocol", 2.68, "kgCO2e/L"),
    factor!("stationary", "Diesel", "EPA", 2.69, "kgCO2e/L"),
    factor!("stationary", "Diesel", "DEFRA", 2.75, "kgCO2e/L"),
    // Scope 1 - mobile combustion
    factor!("mobile", "Gasoline", "GHG_Protocol", 2.31, "kgCO2e/L"),
    factor!("mobile", "Gasoline", "EPA", 2.33, "kgCO2e/L"),
    factor!("mobile", "Gasoline", "DEFRA", 2.34, "kgCO2e/L"),
    factor!("mobile", "Diesel", "GHG_Protocol", 2.68, "kgCO2e/L"),
    factor!("mobile", "Diesel", "EPA", 2.69, "kgCO2e/L"),
    factor!("mobile", "Diesel", "DEFRA", 2.75, "kgCO2e/L"),
    // Scope 2 - purchased electricity
    factor!("electricity", "Grid Electricity", "GHG_Protocol", 0.483, "kgCO2e/kWh"),
    factor!("electricity", "Grid Electricity", "EPA", 0.417, "kgCO2e/kWh"),
    factor!("electricity", "Grid Electricity", "DEFRA", 0.233, "kgCO2e/kWh"),
    // Scope 3 - business travel
    factor!("business_travel", "Air Travel - Short Haul", "GHG_Protocol", 0.121, "kgCO2e/km"),
    factor!("business_travel", "Air Travel - Short Haul", "EPA", 0.115, "kgCO2e/km"),
    factor!("business_travel", "Air Travel - Short Haul", "DEFRA", 0.127, "kgCO2e/km"),
    factor!("business_travel", "Air Travel - Long Haul", "GHG_Protocol", 0.092, "kgCO2e/km"),
    factor!("business_travel", "Air Travel - Long Haul", "EPA", 0.089, "kgCO2e/km"),
    factor!("business_travel", "Air Travel - Long Haul", "DEFRA", 0.095, "kgCO2e/km"),
    factor!("business_travel", "Rail Travel", "GHG_Protocol", 0.037, "kgCO2e/km"),
    factor!("business_travel", "Rail Travel", "EPA", 0.035, "kgCO2e/km"),
    factor!("business_travel", "Rail Travel", "DEFRA", 0.036, "kgCO2e/km"),
    // Scope 3 - purchased goods
    factor!("purchased_goods", "Paper", "GHG_Protocol", 0.939, "kgCO2e/kg"),
    factor!("purchased_goods", "Paper", "EPA", 0.915, "kgCO2e/kg"),
    factor!("purchased_goods", "Paper", "DEFRA", 0.956, "kgCO2e/kg"),
    // Scope 3 - waste
    factor!("waste", "Landfill", "GHG_Protocol", 0.586, "kgCO2e/kg"),
    factor!("waste", "Landfill", "EPA", 0.558, "kgCO2e/kg"),
    factor!("waste", "Landfill", "DEFRA", 0.599, "kgCO2e/kg"),
    factor!("waste", "Recycling", "GHG_Protocol", 0.021, "kgCO2e/kg"),
    factor!("waste", "Recycling", "EPA", 0.019, "kgCO2e/kg"),
    factor!("waste", "Recycling", "DEFRA", 0.023, "kgCO2e/kg"),
];

/// All categories reported under one scope, in catalog order.
pub fn categories_for_scope(scope: Scope) -> impl Iterator<Item = &'static EmissionCategory> {
    EMISSION_CATEGORIES.iter().filter(move |c| c.scope == scope)
}

/// Look up a published factor by category id, source name, and publisher.
pub fn lookup_factor(
    category: &str,
    source: &str,
    publisher: &str,
) -> Option<&'static PublishedFactor> {
    PUBLISHED_FACTORS
        .iter()
        .find(|f| f.category == category && f.source == source && f.publisher == publisher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_cover_all_scopes() {
        assert_eq!(categories_for_scope(Scope::Scope1).count(), 4);
        assert_eq!(categories_for_scope(Scope::Scope2).count(), 2);
        assert_eq!(categories_for_scope(Scope::Scope3).count(), 9);
        assert_eq!(EMISSION_CATEGORIES.len(), 15);
    }

    #[test]
    fn test_category_ids_are_unique() {
        let mut ids: Vec<&str> = EMISSION_CATEGORIES.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), EMISSION_CATEGORIES.len());
    }

    #[test]
    fn test_lookup_known_factor() {
        let factor = lookup_factor("stationary", "Natural Gas", "DEFRA").unwrap();
        assert_eq!(factor.factor, 0.204);
        assert_eq!(factor.unit, "kgCO2e/kWh");
    }

    #[test]
    fn test_lookup_unknown_factor() {
        assert!(lookup_factor("stationary", "Natural Gas", "IPCC").is_none());
        assert!(lookup_factor("fugitive", "R410a", "EPA").is_none());
    }

    #[test]
    fn test_factor_rows_reference_known_publishers() {
        for row in PUBLISHED_FACTORS {
            assert!(
                EMISSION_FACTOR_SOURCES.iter().any(|s| s.value == row.publisher),
                "unknown publisher {}",
                row.publisher
            );
            assert!(
                EMISSION_CATEGORIES.iter().any(|c| c.id == row.category),
                "unknown category {}",
                row.category
            );
        }
    }
}
