//! User aggregate - a player and their adaptive draft difficulty
//!
//! The two thresholds drive the adventure draw: a score is drawn from
//! `1..=current_threshold`, so a smaller ceiling means better odds.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::ids::UserId;
use crate::value_objects::{Rarity, Username};

/// Starting value for both thresholds of a new user.
pub const DEFAULT_THRESHOLD: i32 = 500;

/// The reset threshold never decays below this value, and a hit never
/// leaves the current threshold below it.
pub const THRESHOLD_FLOOR: i32 = 400;

/// Amount the current threshold shrinks after a miss.
pub const MISS_PENALTY: i32 = 10;

/// Amount the reset threshold decays after each hit.
pub const RESET_DECAY: i32 = 5;

/// A registered player.
///
/// # Invariants
///
/// - `reset_threshold` never increases and never decays below
///   [`THRESHOLD_FLOOR`]
/// - after a hit, `current_threshold >= THRESHOLD_FLOOR`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    current_threshold: i32,
    reset_threshold: i32,
    created_at: DateTime<Utc>,
}

impl User {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Register a new user with default thresholds.
    pub fn new(username: Username, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            username,
            current_threshold: DEFAULT_THRESHOLD,
            reset_threshold: DEFAULT_THRESHOLD,
            created_at: now,
        }
    }

    /// Rebuild a user from persisted state.
    pub fn from_storage(
        id: UserId,
        username: Username,
        current_threshold: i32,
        reset_threshold: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            current_threshold,
            reset_threshold,
            created_at,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[inline]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[inline]
    pub fn current_threshold(&self) -> i32 {
        self.current_threshold
    }

    #[inline]
    pub fn reset_threshold(&self) -> i32 {
        self.reset_threshold
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Drafting
    // =========================================================================

    /// The inclusive range an adventure score is drawn from.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` when the current threshold is
    /// below 1, since no score could be drawn.
    pub fn draw_range(&self) -> Result<RangeInclusive<i32>, DomainError> {
        if self.current_threshold < 1 {
            return Err(DomainError::invalid_state(format!(
                "User {} has current_threshold {} (must be >= 1)",
                self.id, self.current_threshold
            )));
        }
        Ok(1..=self.current_threshold)
    }

    /// Adjust the thresholds after drafting `material`.
    ///
    /// A miss (Uncommon, Common or nothing) shrinks the current threshold.
    /// A hit restores it to the reset threshold, decays the reset threshold
    /// while it is above the floor, then clamps the current threshold to the
    /// floor.
    pub fn apply_draft_outcome(&mut self, material: Option<Rarity>) {
        let hit = material.is_some_and(|rarity| rarity.is_hit());
        if !hit {
            self.current_threshold -= MISS_PENALTY;
            return;
        }

        self.current_threshold = self.reset_threshold;
        if self.reset_threshold > THRESHOLD_FLOOR {
            self.reset_threshold -= RESET_DECAY;
        }
        self.current_threshold = self.current_threshold.max(THRESHOLD_FLOOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user() -> User {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        User::new(Username::new("alice").unwrap(), now)
    }

    fn user_with(current: i32, reset: i32) -> User {
        let u = user();
        User::from_storage(u.id(), u.username().clone(), current, reset, u.created_at())
    }

    #[test]
    fn new_user_starts_at_default_thresholds() {
        let u = user();
        assert_eq!(u.current_threshold(), 500);
        assert_eq!(u.reset_threshold(), 500);
    }

    #[test]
    fn miss_tightens_current_threshold() {
        for material in [None, Some(Rarity::Common), Some(Rarity::Uncommon)] {
            let mut u = user();
            u.apply_draft_outcome(material);
            assert_eq!(u.current_threshold(), 490);
            assert_eq!(u.reset_threshold(), 500);
        }
    }

    #[test]
    fn hit_resets_and_decays() {
        for material in [Rarity::Rare, Rarity::Elite, Rarity::Legendary] {
            let mut u = user_with(430, 500);
            u.apply_draft_outcome(Some(material));
            assert_eq!(u.current_threshold(), 500);
            assert_eq!(u.reset_threshold(), 495);
        }
    }

    #[test]
    fn reset_threshold_stops_at_floor() {
        let mut u = user_with(400, 400);
        u.apply_draft_outcome(Some(Rarity::Rare));
        assert_eq!(u.reset_threshold(), 400);
        assert_eq!(u.current_threshold(), 400);
    }

    #[test]
    fn hit_never_leaves_current_below_floor() {
        let mut u = user_with(12, 300);
        u.apply_draft_outcome(Some(Rarity::Legendary));
        assert_eq!(u.current_threshold(), 400);
        assert_eq!(u.reset_threshold(), 300);
    }

    #[test]
    fn repeated_hits_decay_reset_to_floor() {
        let mut u = user();
        for _ in 0..100 {
            u.apply_draft_outcome(Some(Rarity::Elite));
            assert!(u.reset_threshold() >= THRESHOLD_FLOOR);
            assert!(u.current_threshold() >= THRESHOLD_FLOOR);
        }
        assert_eq!(u.reset_threshold(), THRESHOLD_FLOOR);
    }

    #[test]
    fn draw_range_rejects_non_positive_threshold() {
        assert_eq!(user().draw_range().unwrap(), 1..=500);
        assert!(matches!(
            user_with(0, 500).draw_range(),
            Err(DomainError::InvalidState(_))
        ));
    }
}
