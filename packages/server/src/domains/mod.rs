// Business domains
pub mod auth;
pub mod emissions;
pub mod organization;
