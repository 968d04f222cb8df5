// Carbonledger - API Core
//
// Backend API for corporate carbon accounting: an organization directory,
// per-organization emission ledgers, and GHG Protocol consolidation across
// the corporate tree. All state is process memory; the store traits are the
// seam for a persistent backend.

pub mod common;
pub mod config;
pub mod domains;
pub mod seed;
pub mod server;

pub use config::*;
