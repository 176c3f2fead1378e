//! Rarity tiers shared by materials, lootboxes and prizes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Label used for an adventure that yielded no material.
pub const NO_MATERIAL_LABEL: &str = "None";

/// Quality tier of a material, lootbox or prize type.
///
/// Variants are declared from lowest to highest so the derived `Ord`
/// matches the game ordering `Legendary > Elite > Rare > Uncommon > Common`.
///
/// An adventure that found nothing carries `Option<Rarity>::None`; a lootbox
/// always has a rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Elite,
    Legendary,
}

impl Rarity {
    /// Every tier, highest first.
    pub const ALL: [Rarity; 5] = [
        Rarity::Legendary,
        Rarity::Elite,
        Rarity::Rare,
        Rarity::Uncommon,
        Rarity::Common,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Elite => "Elite",
            Self::Legendary => "Legendary",
        }
    }

    /// Whether drafting this tier counts as a "hit" for adaptive difficulty.
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Legendary | Self::Elite | Self::Rare)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Rarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "elite" => Ok(Self::Elite),
            "legendary" => Ok(Self::Legendary),
            _ => Err(DomainError::parse(format!("Unknown rarity: {}", s))),
        }
    }
}

/// Human-readable label for a drafted material, `"None"` when nothing was found.
pub fn material_label(material: Option<Rarity>) -> &'static str {
    material.map_or(NO_MATERIAL_LABEL, |rarity| rarity.as_str())
}
