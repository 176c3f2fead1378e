//! Prize entity - one claimed unit of a prize type

use chrono::{DateTime, Utc};

use crate::ids::{LootBoxId, PrizeId, PrizeTypeId, UserId};

/// Record of a prize awarded to a user from a specific lootbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prize {
    id: PrizeId,
    user_id: UserId,
    prize_type_id: PrizeTypeId,
    loot_box_id: LootBoxId,
    awarded_at: DateTime<Utc>,
}

impl Prize {
    pub fn new(
        user_id: UserId,
        prize_type_id: PrizeTypeId,
        loot_box_id: LootBoxId,
        awarded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PrizeId::new(),
            user_id,
            prize_type_id,
            loot_box_id,
            awarded_at,
        }
    }

    pub fn from_storage(
        id: PrizeId,
        user_id: UserId,
        prize_type_id: PrizeTypeId,
        loot_box_id: LootBoxId,
        awarded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            prize_type_id,
            loot_box_id,
            awarded_at,
        }
    }

    pub fn id(&self) -> PrizeId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn prize_type_id(&self) -> PrizeTypeId {
        self.prize_type_id
    }

    pub fn loot_box_id(&self) -> LootBoxId {
        self.loot_box_id
    }

    pub fn awarded_at(&self) -> DateTime<Utc> {
        self.awarded_at
    }
}
