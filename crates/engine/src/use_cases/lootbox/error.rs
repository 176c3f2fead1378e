//! Lootbox forging errors.

use lootforge_domain::{AdventureId, DomainError, UserId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while forging a lootbox.
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),
    #[error("Exactly {expected} materials are required to forge a LootBox (got {actual})")]
    WrongMaterialCount { expected: usize, actual: usize },
    #[error("Material {0} was listed more than once")]
    DuplicateMaterial(AdventureId),
    #[error("Cannot use already used or ineligible material")]
    MaterialUnavailable,
    #[error("Invalid state: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
