//! Adventure drafting: the threshold draw and adaptive difficulty.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use lootforge_domain::{rules, Adventure, User};

use crate::infrastructure::ports::{ClockPort, RandomPort, UnitOfWork};

use super::error::AdventureError;

/// Draws a material for one adventure attempt and adjusts the user's
/// future draft difficulty.
pub struct AdventureDrafter {
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl AdventureDrafter {
    pub fn new(clock: Arc<dyn ClockPort>, random: Arc<dyn RandomPort>) -> Self {
        Self { clock, random }
    }

    /// Whether a user whose most recent adventure was at `last_adventure`
    /// may go on another one at `now`.
    pub fn is_eligible(&self, last_adventure: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        rules::is_adventure_eligible(last_adventure, now)
    }

    /// Draft one adventure for `user`.
    ///
    /// Updates the user's thresholds in place, then persists both the user
    /// and the new adventure through `uow`. A corrupt threshold fails before
    /// anything is written.
    pub async fn draft(
        &self,
        uow: &mut dyn UnitOfWork,
        user: &mut User,
    ) -> Result<Adventure, AdventureError> {
        let range = user.draw_range()?;
        let score = self.random.gen_range(*range.start(), *range.end());
        let adventure = Adventure::drafted(user.id(), score, self.clock.now());

        let (before_current, before_reset) = (user.current_threshold(), user.reset_threshold());
        user.apply_draft_outcome(adventure.material());

        tracing::debug!(
            user_id = %user.id(),
            score,
            material = lootforge_domain::material_label(adventure.material()),
            current_threshold = before_current,
            reset_threshold = before_reset,
            next_current_threshold = user.current_threshold(),
            next_reset_threshold = user.reset_threshold(),
            "Adventure drafted"
        );

        uow.save_user(user).await?;
        uow.insert_adventure(&adventure).await?;

        Ok(adventure)
    }
}
