//! Domain entities

mod adventure;
mod loot_box;
mod prize;

pub use adventure::{Adventure, AdventureStatus};
pub use loot_box::LootBox;
pub use prize::Prize;
