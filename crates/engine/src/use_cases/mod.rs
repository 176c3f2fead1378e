//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area. Every use case
//! runs inside exactly one unit of work, committed on success and rolled
//! back otherwise.

pub mod adventure;
pub mod lootbox;
pub mod management;
pub mod materials;
pub mod prize;

pub use adventure::AdventureUseCases;
pub use lootbox::LootboxUseCases;
pub use management::ManagementUseCases;
pub use materials::MaterialsUseCases;

use crate::infrastructure::ports::{RepoError, UnitOfWork};

/// Commit `uow` if `result` is a success, roll it back otherwise.
///
/// A failed commit turns a success into an error. A failed rollback is
/// logged and the original error is returned.
pub(crate) async fn finish<T, E>(mut uow: Box<dyn UnitOfWork>, result: Result<T, E>) -> Result<T, E>
where
    E: From<RepoError> + std::fmt::Display,
{
    match result {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tracing::debug!(error = %err, "Rolling back unit of work");
            if let Err(rollback_err) = uow.rollback().await {
                tracing::warn!(error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}
