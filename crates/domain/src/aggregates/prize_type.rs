//! PrizeType aggregate - a catalog entry with finite capacity

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::PrizeTypeId;
use crate::value_objects::{PrizeName, Rarity};

/// A kind of prize that can be awarded a limited number of times.
///
/// # Invariants
///
/// - `number_claimed <= quantity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeType {
    id: PrizeTypeId,
    name: PrizeName,
    rarity: Rarity,
    quantity: u32,
    number_claimed: u32,
}

impl PrizeType {
    /// Create a fresh catalog entry with nothing claimed.
    pub fn new(name: PrizeName, rarity: Rarity, quantity: u32) -> Self {
        Self {
            id: PrizeTypeId::new(),
            name,
            rarity,
            quantity,
            number_claimed: 0,
        }
    }

    /// Rebuild a prize type from persisted state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if more units are claimed than exist.
    pub fn from_storage(
        id: PrizeTypeId,
        name: PrizeName,
        rarity: Rarity,
        quantity: u32,
        number_claimed: u32,
    ) -> Result<Self, DomainError> {
        if number_claimed > quantity {
            return Err(DomainError::validation(format!(
                "Prize type {} has {} claimed of {}",
                id, number_claimed, quantity
            )));
        }
        Ok(Self {
            id,
            name,
            rarity,
            quantity,
            number_claimed,
        })
    }

    #[inline]
    pub fn id(&self) -> PrizeTypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &PrizeName {
        &self.name
    }

    #[inline]
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[inline]
    pub fn number_claimed(&self) -> u32 {
        self.number_claimed
    }

    /// Units still available.
    pub fn remaining(&self) -> u32 {
        self.quantity - self.number_claimed
    }

    pub fn is_exhausted(&self) -> bool {
        self.number_claimed >= self.quantity
    }

    /// Claim one unit.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CapacityExhausted` when nothing remains.
    pub fn claim(&mut self) -> Result<(), DomainError> {
        if self.is_exhausted() {
            return Err(DomainError::capacity_exhausted(
                self.number_claimed,
                self.quantity,
            ));
        }
        self.number_claimed += 1;
        Ok(())
    }
}
