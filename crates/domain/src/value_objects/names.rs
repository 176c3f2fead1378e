//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for usernames
const MAX_USERNAME_LENGTH: usize = 120;

/// Maximum length for prize names
const MAX_PRIZE_NAME_LENGTH: usize = 120;

// ============================================================================
// Username
// ============================================================================

/// A validated username (non-empty, <=120 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new validated username.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 120 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Username cannot be empty"));
        }
        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Username cannot exceed {} characters",
                MAX_USERNAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> String {
        name.0
    }
}

// ============================================================================
// PrizeName
// ============================================================================

/// A validated prize name (non-empty, <=120 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrizeName(String);

impl PrizeName {
    /// Create a new validated prize name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty or too long.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Prize name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_PRIZE_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Prize name cannot exceed {} characters",
                MAX_PRIZE_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrizeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PrizeName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PrizeName> for String {
    fn from(name: PrizeName) -> String {
        name.0
    }
}
