// Emissions domain - the activity ledger and consolidation engine
//
// Responsibilities:
// - Append-only emissions ledger keyed by organization
// - GHG Protocol consolidation (financial control / operational control /
//   equity share), single-level and full roll-up
// - Reference data: categories, units, published factors

pub mod aggregate;
pub mod catalog;
pub mod ledger;
pub mod models;

pub use aggregate::{aggregate, aggregate_rollup, AggregatedEmissions, AggregationError};
pub use ledger::{EmissionsLedger, InMemoryEmissionsLedger};
pub use models::*;
