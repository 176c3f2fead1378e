//! Reward rules: score-to-tier mapping, lootbox aggregation and the
//! adventure cooldown.
//!
//! Everything here is pure. Randomness and the current time are supplied
//! by the caller.

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::Rarity;

/// Hours a user must wait between two adventures.
pub const ADVENTURE_COOLDOWN_HOURS: i64 = 24;

/// Number of materials consumed to forge one lootbox.
pub const MATERIALS_PER_LOOTBOX: usize = 5;

/// Exclusive upper bounds of each tier, highest tier first.
const TIER_BOUNDS: [(i32, Rarity); 5] = [
    (5, Rarity::Legendary),
    (20, Rarity::Elite),
    (50, Rarity::Rare),
    (100, Rarity::Uncommon),
    (175, Rarity::Common),
];

/// Map a drafted score to the material it yields.
///
/// Returns `None` for scores of 175 and above.
///
/// # Example
///
/// ```
/// use lootforge_domain::rules::material_for_score;
/// use lootforge_domain::Rarity;
///
/// assert_eq!(material_for_score(4), Some(Rarity::Legendary));
/// assert_eq!(material_for_score(175), None);
/// ```
pub fn material_for_score(score: i32) -> Option<Rarity> {
    TIER_BOUNDS
        .iter()
        .find(|(bound, _)| score < *bound)
        .map(|(_, rarity)| *rarity)
}

/// Compute the rarity of a lootbox forged from materials with the given
/// draft scores.
///
/// The scores are averaged as a real number and mapped with the same bounds
/// as materials, except that anything at or above 100 is `Common`.
pub fn lootbox_rarity(scores: &[i32]) -> Rarity {
    if scores.is_empty() {
        return Rarity::Common;
    }
    let sum: i64 = scores.iter().map(|score| i64::from(*score)).sum();
    let scaled = sum as f64 / scores.len() as f64;

    TIER_BOUNDS
        .iter()
        .take(4)
        .find(|(bound, _)| scaled < f64::from(*bound))
        .map_or(Rarity::Common, |(_, rarity)| *rarity)
}

/// Whether a user whose latest adventure happened at `last_adventure` may
/// start another one at `now`.
pub fn is_adventure_eligible(last_adventure: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_adventure {
        None => true,
        Some(last) => now - last >= Duration::hours(ADVENTURE_COOLDOWN_HOURS),
    }
}

/// Instant at which the cooldown started by `last_adventure` ends.
pub fn next_eligible_at(last_adventure: DateTime<Utc>) -> DateTime<Utc> {
    last_adventure + Duration::hours(ADVENTURE_COOLDOWN_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn material_tier_boundaries() {
        let cases = [
            (1, Some(Rarity::Legendary)),
            (4, Some(Rarity::Legendary)),
            (5, Some(Rarity::Elite)),
            (19, Some(Rarity::Elite)),
            (20, Some(Rarity::Rare)),
            (49, Some(Rarity::Rare)),
            (50, Some(Rarity::Uncommon)),
            (99, Some(Rarity::Uncommon)),
            (100, Some(Rarity::Common)),
            (174, Some(Rarity::Common)),
            (175, None),
            (500, None),
        ];
        for (score, expected) in cases {
            assert_eq!(material_for_score(score), expected, "score {}", score);
        }
    }

    #[test]
    fn lootbox_average_of_five_is_elite() {
        assert_eq!(lootbox_rarity(&[5, 5, 5, 5, 5]), Rarity::Elite);
        assert_eq!(lootbox_rarity(&[1, 2, 3, 4, 15]), Rarity::Elite);
    }

    #[test]
    fn lootbox_average_uses_fractional_scale() {
        // 24 / 5 = 4.8
        assert_eq!(lootbox_rarity(&[4, 4, 4, 4, 8]), Rarity::Legendary);
        // 99.8 stays below the Common bound
        assert_eq!(lootbox_rarity(&[100, 100, 100, 100, 99]), Rarity::Uncommon);
    }

    #[test]
    fn lootbox_never_has_no_tier() {
        assert_eq!(lootbox_rarity(&[174, 174, 174, 174, 174]), Rarity::Common);
        assert_eq!(lootbox_rarity(&[500, 500, 500, 500, 500]), Rarity::Common);
    }

    #[test]
    fn eligibility_with_no_history() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(is_adventure_eligible(None, now));
    }

    #[test]
    fn eligibility_at_cooldown_boundary() {
        let last = Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap();

        assert!(is_adventure_eligible(Some(last), last + Duration::hours(24)));
        assert!(!is_adventure_eligible(
            Some(last),
            last + Duration::hours(24) - Duration::seconds(1)
        ));
        assert!(!is_adventure_eligible(Some(last), last));
    }

    #[test]
    fn next_eligible_is_one_day_later() {
        let last = Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap();
        assert_eq!(
            next_eligible_at(last),
            Utc.with_ymd_and_hms(2024, 1, 2, 8, 30, 0).unwrap()
        );
    }
}
