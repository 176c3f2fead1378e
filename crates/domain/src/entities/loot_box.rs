//! LootBox entity

use chrono::{DateTime, Utc};

use crate::ids::{LootBoxId, UserId};
use crate::value_objects::Rarity;

/// A lootbox forged from five materials. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootBox {
    id: LootBoxId,
    user_id: UserId,
    rarity: Rarity,
    created_at: DateTime<Utc>,
}

impl LootBox {
    pub fn new(user_id: UserId, rarity: Rarity, created_at: DateTime<Utc>) -> Self {
        Self {
            id: LootBoxId::new(),
            user_id,
            rarity,
            created_at,
        }
    }

    pub fn from_storage(
        id: LootBoxId,
        user_id: UserId,
        rarity: Rarity,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            rarity,
            created_at,
        }
    }

    pub fn id(&self) -> LootBoxId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
