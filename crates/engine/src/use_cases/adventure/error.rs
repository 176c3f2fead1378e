//! Adventure operation errors.

use chrono::{DateTime, Utc};
use lootforge_domain::{DomainError, UserId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while performing an adventure.
#[derive(Debug, thiserror::Error)]
pub enum AdventureError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),
    #[error("You can only go on one adventure per day (next at {available_at})")]
    NotEligible { available_at: DateTime<Utc> },
    #[error("Invalid state: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
