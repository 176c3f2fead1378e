//! Forge lootbox use case.

use std::sync::Arc;

use lootforge_domain::{AdventureId, UserId};

use crate::infrastructure::ports::{EconomyStore, UnitOfWork};
use crate::use_cases::finish;

use super::error::ForgeError;
use super::forger::{ForgedLootBox, LootboxForger};

/// Forge lootbox use case.
///
/// Orchestrates: user lookup, forging (validation, consumption, prize
/// allocation), commit. Any failure leaves every material untouched.
pub struct ForgeLootbox {
    store: Arc<dyn EconomyStore>,
    forger: Arc<LootboxForger>,
}

impl ForgeLootbox {
    pub fn new(store: Arc<dyn EconomyStore>, forger: Arc<LootboxForger>) -> Self {
        Self { store, forger }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        material_ids: &[AdventureId],
    ) -> Result<ForgedLootBox, ForgeError> {
        let mut uow = self.store.begin().await?;
        let result = self.run(uow.as_mut(), user_id, material_ids).await;
        finish(uow, result).await
    }

    async fn run(
        &self,
        uow: &mut dyn UnitOfWork,
        user_id: UserId,
        material_ids: &[AdventureId],
    ) -> Result<ForgedLootBox, ForgeError> {
        let user = uow
            .get_user(user_id)
            .await?
            .ok_or(ForgeError::UserNotFound(user_id))?;

        self.forger.forge(uow, &user, material_ids).await
    }
}
