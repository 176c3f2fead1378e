extern crate self as lootforge_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod rules;
pub mod value_objects;

pub use aggregates::{PrizeType, User};
pub use entities::{Adventure, AdventureStatus, LootBox, Prize};
pub use error::DomainError;
pub use ids::{AdventureId, LootBoxId, PrizeId, PrizeTypeId, UserId};
pub use value_objects::{material_label, MaterialsSummary, PrizeName, Rarity, Username};
