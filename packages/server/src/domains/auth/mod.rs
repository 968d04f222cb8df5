//! Auth domain - accounts, credentials, and the access gate
//!
//! Responsibilities:
//! - Email/password login against the in-memory account directory
//! - JWT token management (24-hour expiry, issuer-validated)
//! - Role-based access gate over organizations and their ledgers

pub mod capability;
pub mod jwt;
pub mod models;
pub mod service;

pub use capability::{can_access_emissions, can_access_organization};
pub use jwt::{Claims, JwtService};
pub use models::*;
pub use service::{AuthError, AuthService, LoginResponse, RegisterResponse, UserDirectory};
