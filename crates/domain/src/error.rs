//! Unified error types for the domain layer
//!
//! Provides a common error type for domain operations so adapters never need
//! to fall back to `String` or `anyhow` for rule violations.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Persisted state cannot support the requested operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// A capped resource has no remaining capacity
    #[error("Capacity exhausted: {claimed}/{capacity} claimed")]
    CapacityExhausted { claimed: u32, capacity: u32 },
}

impl DomainError {
    /// Creates a validation error for malformed input values.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Username cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates an invalid state error.
    ///
    /// Used when a stored value is corrupt enough that a rule cannot be
    /// evaluated at all, e.g. a draft threshold below 1.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    /// Create a capacity exhausted error
    pub fn capacity_exhausted(claimed: u32, capacity: u32) -> Self {
        Self::CapacityExhausted { claimed, capacity }
    }
}
