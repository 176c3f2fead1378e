//! Adventure entity - one timed draft attempt and the material it produced

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::ids::{AdventureId, UserId};
use crate::rules::material_for_score;
use crate::value_objects::Rarity;

/// Lifecycle of an adventure.
///
/// `InProgress` only exists between creation and finalization. `NoMaterial`
/// and `UsedMaterial` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdventureStatus {
    InProgress,
    NoMaterial,
    UnusedMaterial,
    UsedMaterial,
}

impl AdventureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::NoMaterial => "no_material",
            Self::UnusedMaterial => "unused_material",
            Self::UsedMaterial => "used_material",
        }
    }
}

impl fmt::Display for AdventureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdventureStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "no_material" => Ok(Self::NoMaterial),
            "unused_material" => Ok(Self::UnusedMaterial),
            "used_material" => Ok(Self::UsedMaterial),
            other => Err(DomainError::parse(format!(
                "Unknown adventure status: {}",
                other
            ))),
        }
    }
}

/// A completed draft attempt.
///
/// Score, material and timestamp are fixed at creation. Only the status
/// moves, and only forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adventure {
    id: AdventureId,
    user_id: UserId,
    timestamp: DateTime<Utc>,
    rng_score: i32,
    material: Option<Rarity>,
    status: AdventureStatus,
}

impl Adventure {
    /// Record a draft with the given score and finalize it immediately.
    pub fn drafted(user_id: UserId, rng_score: i32, timestamp: DateTime<Utc>) -> Self {
        let mut adventure = Self {
            id: AdventureId::new(),
            user_id,
            timestamp,
            rng_score,
            material: material_for_score(rng_score),
            status: AdventureStatus::InProgress,
        };
        adventure.finalize();
        adventure
    }

    /// Rebuild an adventure from persisted state.
    pub fn from_storage(
        id: AdventureId,
        user_id: UserId,
        timestamp: DateTime<Utc>,
        rng_score: i32,
        material: Option<Rarity>,
        status: AdventureStatus,
    ) -> Self {
        Self {
            id,
            user_id,
            timestamp,
            rng_score,
            material,
            status,
        }
    }

    fn finalize(&mut self) {
        if self.status == AdventureStatus::InProgress {
            self.status = match self.material {
                Some(_) => AdventureStatus::UnusedMaterial,
                None => AdventureStatus::NoMaterial,
            };
        }
    }

    pub fn id(&self) -> AdventureId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn rng_score(&self) -> i32 {
        self.rng_score
    }

    pub fn material(&self) -> Option<Rarity> {
        self.material
    }

    pub fn status(&self) -> AdventureStatus {
        self.status
    }

    /// Mark the material as consumed by forging.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` unless the adventure is
    /// currently `UnusedMaterial`.
    pub fn consume(&mut self) -> Result<(), DomainError> {
        if self.status != AdventureStatus::UnusedMaterial {
            return Err(DomainError::invalid_state_transition(format!(
                "Adventure {} cannot move from {} to {}",
                self.id,
                self.status,
                AdventureStatus::UsedMaterial
            )));
        }
        self.status = AdventureStatus::UsedMaterial;
        Ok(())
    }
}
