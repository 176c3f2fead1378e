//! Perform adventure use case.
//!
//! Checks the daily cooldown and drafts a material for the user.

use std::sync::Arc;

use lootforge_domain::{rules, Adventure, UserId};

use crate::infrastructure::ports::{ClockPort, EconomyStore, UnitOfWork};
use crate::use_cases::finish;

use super::drafter::AdventureDrafter;
use super::error::AdventureError;

/// Perform adventure use case.
///
/// Orchestrates: user lookup, cooldown check, draft, commit.
pub struct PerformAdventure {
    store: Arc<dyn EconomyStore>,
    drafter: Arc<AdventureDrafter>,
    clock: Arc<dyn ClockPort>,
}

impl PerformAdventure {
    pub fn new(
        store: Arc<dyn EconomyStore>,
        drafter: Arc<AdventureDrafter>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            store,
            drafter,
            clock,
        }
    }

    /// Execute the perform adventure use case.
    ///
    /// # Returns
    /// * `Ok(Adventure)` - The drafted adventure, already persisted
    /// * `Err(AdventureError::UserNotFound)` - No such user
    /// * `Err(AdventureError::NotEligible)` - The cooldown has not elapsed
    pub async fn execute(&self, user_id: UserId) -> Result<Adventure, AdventureError> {
        let mut uow = self.store.begin().await?;
        let result = self.run(uow.as_mut(), user_id).await;
        finish(uow, result).await
    }

    async fn run(
        &self,
        uow: &mut dyn UnitOfWork,
        user_id: UserId,
    ) -> Result<Adventure, AdventureError> {
        let mut user = uow
            .get_user(user_id)
            .await?
            .ok_or(AdventureError::UserNotFound(user_id))?;

        let now = self.clock.now();
        let last = uow.latest_adventure(user_id).await?.map(|a| a.timestamp());
        if !self.drafter.is_eligible(last, now) {
            let available_at = last.map_or(now, rules::next_eligible_at);
            tracing::warn!(%user_id, %available_at, "Adventure rejected: cooldown active");
            return Err(AdventureError::NotEligible { available_at });
        }

        let adventure = self.drafter.draft(uow, &mut user).await?;
        tracing::info!(
            %user_id,
            adventure_id = %adventure.id(),
            material = lootforge_domain::material_label(adventure.material()),
            "Adventure complete"
        );
        Ok(adventure)
    }
}
