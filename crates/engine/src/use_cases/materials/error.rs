//! Errors for read-only material queries.

use lootforge_domain::UserId;

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
