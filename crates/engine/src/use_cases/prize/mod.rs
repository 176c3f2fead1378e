//! Prize allocation.
//!
//! Hands out one unit of the first prize type (catalog order) that matches a
//! lootbox's rarity and still has capacity.

use std::sync::Arc;

use lootforge_domain::{LootBoxId, Prize, PrizeType, Rarity, UserId};

use crate::infrastructure::ports::{ClockPort, RepoError, UnitOfWork};

/// Upper bound on re-selections after losing a conditional claim.
const MAX_CLAIM_ATTEMPTS: usize = 8;

/// Result of trying to award a prize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrizeOutcome {
    Awarded { prize: Prize, prize_type: PrizeType },
    /// Every prize type of this rarity is exhausted (or none exists).
    Unavailable { rarity: Rarity },
}

impl PrizeOutcome {
    pub fn is_awarded(&self) -> bool {
        matches!(self, Self::Awarded { .. })
    }
}

/// First-come allocation against the capped prize inventory.
pub struct PrizeAllocator {
    clock: Arc<dyn ClockPort>,
}

impl PrizeAllocator {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }

    /// Claim one prize of `rarity` for `user_id`, recording the lootbox it
    /// came from.
    ///
    /// Running out of capacity is a normal outcome, not an error.
    pub async fn allocate(
        &self,
        uow: &mut dyn UnitOfWork,
        user_id: UserId,
        rarity: Rarity,
        loot_box_id: LootBoxId,
    ) -> Result<PrizeOutcome, RepoError> {
        for _ in 0..MAX_CLAIM_ATTEMPTS {
            let Some(mut prize_type) = uow.first_available_prize_type(rarity).await? else {
                tracing::debug!(%rarity, %user_id, "No prize capacity left for rarity");
                return Ok(PrizeOutcome::Unavailable { rarity });
            };

            if !uow.claim_prize_unit(prize_type.id()).await? {
                tracing::debug!(
                    prize_type_id = %prize_type.id(),
                    "Prize type exhausted between select and claim, re-selecting"
                );
                continue;
            }
            prize_type.claim().map_err(RepoError::constraint)?;

            let prize = Prize::new(user_id, prize_type.id(), loot_box_id, self.clock.now());
            uow.insert_prize(&prize).await?;

            tracing::info!(
                %user_id,
                prize_id = %prize.id(),
                prize_type = %prize_type.name(),
                %rarity,
                remaining = prize_type.remaining(),
                "Prize awarded"
            );
            return Ok(PrizeOutcome::Awarded { prize, prize_type });
        }

        Err(RepoError::constraint(format!(
            "prize claim for {} kept conflicting after {} attempts",
            rarity, MAX_CLAIM_ATTEMPTS
        )))
    }
}
