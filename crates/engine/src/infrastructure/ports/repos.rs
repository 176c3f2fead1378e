//! Storage port traits.
//!
//! All reads and writes for one logical operation go through a single
//! [`UnitOfWork`]. Nothing is visible to other units until `commit`; a unit
//! dropped without commit is rolled back.

use async_trait::async_trait;
use lootforge_domain::{
    Adventure, AdventureId, LootBox, Prize, PrizeType, PrizeTypeId, Rarity, User, UserId,
};

use super::error::RepoError;

// =============================================================================
// Store
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EconomyStore: Send + Sync {
    /// Start a unit of work. Units are serialized: this waits until any
    /// other open unit has committed or rolled back.
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepoError>;
}

// =============================================================================
// Unit of Work
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send {
    // Users
    async fn get_user(&mut self, id: UserId) -> Result<Option<User>, RepoError>;
    /// Fails with `RepoError::ConstraintViolation` if the username is taken.
    async fn insert_user(&mut self, user: &User) -> Result<(), RepoError>;
    /// Persist the user's thresholds.
    async fn save_user(&mut self, user: &User) -> Result<(), RepoError>;

    // Adventures
    async fn latest_adventure(&mut self, user_id: UserId) -> Result<Option<Adventure>, RepoError>;
    /// Newest first.
    async fn list_adventures(&mut self, user_id: UserId) -> Result<Vec<Adventure>, RepoError>;
    /// Adventures with the given ids. Unknown ids are simply absent from the result.
    async fn get_adventures(&mut self, ids: &[AdventureId]) -> Result<Vec<Adventure>, RepoError>;
    async fn insert_adventure(&mut self, adventure: &Adventure) -> Result<(), RepoError>;
    /// Move each listed adventure owned by `user_id` from unused to used
    /// material, only if it is still unused. Returns how many moved.
    async fn consume_materials(
        &mut self,
        user_id: UserId,
        ids: &[AdventureId],
    ) -> Result<u64, RepoError>;

    // Loot boxes
    async fn insert_loot_box(&mut self, loot_box: &LootBox) -> Result<(), RepoError>;

    // Prize catalog
    /// First prize type in catalog order with this rarity and capacity left.
    async fn first_available_prize_type(
        &mut self,
        rarity: Rarity,
    ) -> Result<Option<PrizeType>, RepoError>;
    /// Claim one unit if any remain. Returns false when the type was exhausted.
    async fn claim_prize_unit(&mut self, id: PrizeTypeId) -> Result<bool, RepoError>;
    async fn insert_prize(&mut self, prize: &Prize) -> Result<(), RepoError>;
    async fn insert_prize_type(&mut self, prize_type: &PrizeType) -> Result<(), RepoError>;
    /// Catalog order.
    async fn list_prize_types(&mut self) -> Result<Vec<PrizeType>, RepoError>;

    // Completion
    async fn commit(&mut self) -> Result<(), RepoError>;
    async fn rollback(&mut self) -> Result<(), RepoError>;
}
