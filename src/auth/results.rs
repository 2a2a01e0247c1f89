//! Authentication result types
//!
//! Defines result structures returned by registration operations.

/// Result of a successful registration. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
}
