//! Management operation errors.

use lootforge_domain::DomainError;

use crate::infrastructure::ports::RepoError;

/// Errors from registering users and maintaining the prize catalog.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
