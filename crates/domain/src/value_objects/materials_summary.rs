//! Per-tier material counts for a single user.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{Adventure, AdventureStatus};
use crate::value_objects::Rarity;

/// Counts of drafted materials per rarity, split by whether they were
/// consumed by forging.
///
/// Only tiers that actually occur are present. Adventures that found nothing
/// never contribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialsSummary {
    used: BTreeMap<Rarity, u32>,
    unused: BTreeMap<Rarity, u32>,
}

impl MaterialsSummary {
    /// Tally a user's adventures.
    pub fn from_adventures<'a>(adventures: impl IntoIterator<Item = &'a Adventure>) -> Self {
        let mut summary = Self::default();
        for adventure in adventures {
            let Some(rarity) = adventure.material() else {
                continue;
            };
            let bucket = match adventure.status() {
                AdventureStatus::UsedMaterial => &mut summary.used,
                AdventureStatus::UnusedMaterial => &mut summary.unused,
                AdventureStatus::InProgress | AdventureStatus::NoMaterial => continue,
            };
            *bucket.entry(rarity).or_insert(0) += 1;
        }
        summary
    }

    pub fn used(&self) -> &BTreeMap<Rarity, u32> {
        &self.used
    }

    pub fn unused(&self) -> &BTreeMap<Rarity, u32> {
        &self.unused
    }

    /// Number of unused materials of the given tier.
    pub fn unused_count(&self, rarity: Rarity) -> u32 {
        self.unused.get(&rarity).copied().unwrap_or(0)
    }

    /// Number of consumed materials of the given tier.
    pub fn used_count(&self, rarity: Rarity) -> u32 {
        self.used.get(&rarity).copied().unwrap_or(0)
    }
}
