//! Response bodies returned by the REST API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lootforge_domain::Rarity;

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// =============================================================================
// Economy
// =============================================================================

/// Result of a successful adventure. `material` is a tier name or `"None"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdventureResponse {
    pub message: String,
    pub material: String,
}

/// The prize handed out for a forged lootbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardedPrizeResponse {
    pub id: Uuid,
    pub prize_type_id: Uuid,
    pub name: String,
    pub rarity: Rarity,
}

/// Result of a successful forge. `prize` is null when no prize of the
/// lootbox's rarity was left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeLootboxResponse {
    pub message: String,
    pub loot_box_id: Uuid,
    pub rarity: Rarity,
    pub prize: Option<AwardedPrizeResponse>,
}

/// Material counts keyed by tier name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialsSummaryResponse {
    pub used_materials_summary: BTreeMap<String, u32>,
    pub unused_materials_summary: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdventureHistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub material: String,
}

/// A user's adventures, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdventureHistoryResponse {
    pub adventure_history: Vec<AdventureHistoryEntry>,
}

// =============================================================================
// Management
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub current_threshold: i32,
    pub reset_threshold: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub rarity: Rarity,
    pub quantity: u32,
    pub number_claimed: u32,
    pub remaining: u32,
}
