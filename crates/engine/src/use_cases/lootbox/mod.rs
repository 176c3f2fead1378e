//! Lootbox use cases.

mod error;
mod forge_lootbox;
mod forger;

use std::sync::Arc;

pub use error::ForgeError;
pub use forge_lootbox::ForgeLootbox;
pub use forger::{ForgedLootBox, LootboxForger};

/// Container for lootbox use cases.
pub struct LootboxUseCases {
    pub forge: Arc<ForgeLootbox>,
}

impl LootboxUseCases {
    pub fn new(forge: Arc<ForgeLootbox>) -> Self {
        Self { forge }
    }
}
