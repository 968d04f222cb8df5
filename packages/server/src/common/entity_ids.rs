//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use server_core::common::{OrganizationId, UserId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let org_id: OrganizationId = OrganizationId::new();
//! let user_id: UserId = UserId::new();
//!
//! // This would be a compile error:
//! // let wrong: UserId = org_id;
//! ```

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Organization entities (reporting units).
pub struct Organization;

/// Marker type for User entities (dashboard accounts).
pub struct User;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Organization entities.
pub type OrganizationId = Id<Organization>;

/// Typed ID for User entities.
pub type UserId = Id<User>;
