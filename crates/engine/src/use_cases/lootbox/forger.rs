//! Lootbox forging: validate five materials, aggregate their scores, consume
//! them and hand the lootbox to the prize allocator.

use std::collections::HashSet;
use std::sync::Arc;

use lootforge_domain::rules::{lootbox_rarity, MATERIALS_PER_LOOTBOX};
use lootforge_domain::{AdventureId, LootBox, User};

use crate::infrastructure::ports::{ClockPort, UnitOfWork};
use crate::use_cases::prize::{PrizeAllocator, PrizeOutcome};

use super::error::ForgeError;

/// A freshly forged lootbox and what it paid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgedLootBox {
    pub loot_box: LootBox,
    pub prize: PrizeOutcome,
}

pub struct LootboxForger {
    clock: Arc<dyn ClockPort>,
    allocator: Arc<PrizeAllocator>,
}

impl LootboxForger {
    pub fn new(clock: Arc<dyn ClockPort>, allocator: Arc<PrizeAllocator>) -> Self {
        Self { clock, allocator }
    }

    /// Reject selections that are the wrong size or list a material twice.
    pub fn validate_selection(material_ids: &[AdventureId]) -> Result<(), ForgeError> {
        if material_ids.len() != MATERIALS_PER_LOOTBOX {
            return Err(ForgeError::WrongMaterialCount {
                expected: MATERIALS_PER_LOOTBOX,
                actual: material_ids.len(),
            });
        }
        let mut seen = HashSet::with_capacity(material_ids.len());
        for id in material_ids {
            if !seen.insert(*id) {
                return Err(ForgeError::DuplicateMaterial(*id));
            }
        }
        Ok(())
    }

    /// Forge a lootbox for `user` from the given materials.
    ///
    /// Every material must exist, belong to `user` and still be unused.
    /// Nothing is written unless all of them qualify.
    pub async fn forge(
        &self,
        uow: &mut dyn UnitOfWork,
        user: &User,
        material_ids: &[AdventureId],
    ) -> Result<ForgedLootBox, ForgeError> {
        Self::validate_selection(material_ids)?;

        let mut materials = uow.get_adventures(material_ids).await?;
        if materials.len() != material_ids.len() {
            tracing::warn!(
                user_id = %user.id(),
                requested = material_ids.len(),
                found = materials.len(),
                "Forge rejected: unknown material"
            );
            return Err(ForgeError::MaterialUnavailable);
        }
        if let Some(foreign) = materials.iter().find(|m| m.user_id() != user.id()) {
            tracing::warn!(
                user_id = %user.id(),
                adventure_id = %foreign.id(),
                "Forge rejected: material owned by another user"
            );
            return Err(ForgeError::MaterialUnavailable);
        }
        for material in &mut materials {
            if let Err(e) = material.consume() {
                tracing::warn!(
                    user_id = %user.id(),
                    adventure_id = %material.id(),
                    error = %e,
                    "Forge rejected: material not available"
                );
                return Err(ForgeError::MaterialUnavailable);
            }
        }

        let scores: Vec<i32> = materials.iter().map(|m| m.rng_score()).collect();
        let rarity = lootbox_rarity(&scores);

        let consumed = uow.consume_materials(user.id(), material_ids).await?;
        if consumed != material_ids.len() as u64 {
            tracing::warn!(
                user_id = %user.id(),
                consumed,
                "Forge lost a race for its materials"
            );
            return Err(ForgeError::MaterialUnavailable);
        }

        let loot_box = LootBox::new(user.id(), rarity, self.clock.now());
        uow.insert_loot_box(&loot_box).await?;

        let prize = self
            .allocator
            .allocate(uow, user.id(), rarity, loot_box.id())
            .await?;

        tracing::info!(
            user_id = %user.id(),
            loot_box_id = %loot_box.id(),
            %rarity,
            awarded = prize.is_awarded(),
            "LootBox forged"
        );

        Ok(ForgedLootBox { loot_box, prize })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockUnitOfWork;
    use chrono::{DateTime, TimeZone, Utc};
    use lootforge_domain::{
        Adventure, AdventureStatus, PrizeName, PrizeType, Rarity, UserId, Username,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap()
    }

    fn forger() -> LootboxForger {
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(now()));
        LootboxForger::new(clock.clone(), Arc::new(PrizeAllocator::new(clock)))
    }

    fn test_user() -> User {
        User::new(Username::new("alice").unwrap(), now())
    }

    fn materials(owner: UserId, scores: [i32; 5]) -> Vec<Adventure> {
        scores
            .iter()
            .map(|score| Adventure::drafted(owner, *score, now()))
            .collect()
    }

    fn ids(adventures: &[Adventure]) -> Vec<AdventureId> {
        adventures.iter().map(|a| a.id()).collect()
    }

    #[test]
    fn validate_rejects_wrong_count() {
        let four: Vec<AdventureId> = (0..4).map(|_| AdventureId::new()).collect();
        assert!(matches!(
            LootboxForger::validate_selection(&four),
            Err(ForgeError::WrongMaterialCount {
                expected: 5,
                actual: 4
            })
        ));
        let six: Vec<AdventureId> = (0..6).map(|_| AdventureId::new()).collect();
        assert!(LootboxForger::validate_selection(&six).is_err());
    }

    #[test]
    fn validate_rejects_duplicates() {
        let repeated = AdventureId::new();
        let selection = vec![
            repeated,
            AdventureId::new(),
            repeated,
            AdventureId::new(),
            AdventureId::new(),
        ];
        assert!(matches!(
            LootboxForger::validate_selection(&selection),
            Err(ForgeError::DuplicateMaterial(id)) if id == repeated
        ));
    }

    #[tokio::test]
    async fn when_count_wrong_touches_nothing() {
        let user = test_user();
        let mut uow = MockUnitOfWork::new();

        let result = forger().forge(&mut uow, &user, &[AdventureId::new()]).await;

        assert!(matches!(result, Err(ForgeError::WrongMaterialCount { .. })));
    }

    #[tokio::test]
    async fn when_material_already_used_no_mutation() {
        let user = test_user();
        let mut adventures = materials(user.id(), [1, 2, 3, 4, 5]);
        let used = adventures[2].clone();
        adventures[2] = Adventure::from_storage(
            used.id(),
            used.user_id(),
            used.timestamp(),
            used.rng_score(),
            used.material(),
            AdventureStatus::UsedMaterial,
        );
        let selection = ids(&adventures);

        let mut uow = MockUnitOfWork::new();
        uow.expect_get_adventures()
            .times(1)
            .returning(move |_| Ok(adventures.clone()));
        // No consume, insert or allocation expected

        let result = forger().forge(&mut uow, &user, &selection).await;

        assert!(matches!(result, Err(ForgeError::MaterialUnavailable)));
    }

    #[tokio::test]
    async fn when_material_without_drop_rejected() {
        let user = test_user();
        let adventures = materials(user.id(), [1, 2, 3, 4, 400]);
        let selection = ids(&adventures);

        let mut uow = MockUnitOfWork::new();
        uow.expect_get_adventures()
            .returning(move |_| Ok(adventures.clone()));

        let result = forger().forge(&mut uow, &user, &selection).await;

        assert!(matches!(result, Err(ForgeError::MaterialUnavailable)));
    }

    #[tokio::test]
    async fn when_material_missing_rejected() {
        let user = test_user();
        let mut adventures = materials(user.id(), [1, 2, 3, 4, 5]);
        let selection = ids(&adventures);
        adventures.pop();

        let mut uow = MockUnitOfWork::new();
        uow.expect_get_adventures()
            .returning(move |_| Ok(adventures.clone()));

        let result = forger().forge(&mut uow, &user, &selection).await;

        assert!(matches!(result, Err(ForgeError::MaterialUnavailable)));
    }

    #[tokio::test]
    async fn when_material_owned_by_someone_else_rejected() {
        let user = test_user();
        let mut adventures = materials(user.id(), [1, 2, 3, 4, 5]);
        adventures[0] = Adventure::drafted(UserId::new(), 1, now());
        let selection = ids(&adventures);

        let mut uow = MockUnitOfWork::new();
        uow.expect_get_adventures()
            .returning(move |_| Ok(adventures.clone()));

        let result = forger().forge(&mut uow, &user, &selection).await;

        assert!(matches!(result, Err(ForgeError::MaterialUnavailable)));
    }

    #[tokio::test]
    async fn when_concurrent_forge_consumed_materials_rejected() {
        let user = test_user();
        let adventures = materials(user.id(), [1, 2, 3, 4, 5]);
        let selection = ids(&adventures);

        let mut uow = MockUnitOfWork::new();
        uow.expect_get_adventures()
            .returning(move |_| Ok(adventures.clone()));
        uow.expect_consume_materials()
            .times(1)
            .returning(|_, _| Ok(3));
        // No lootbox insert expected

        let result = forger().forge(&mut uow, &user, &selection).await;

        assert!(matches!(result, Err(ForgeError::MaterialUnavailable)));
    }

    #[tokio::test]
    async fn forges_elite_box_and_awards_prize() {
        let user = test_user();
        let user_id = user.id();
        // 25 / 5 = 5.0
        let adventures = materials(user_id, [1, 2, 3, 4, 15]);
        let selection = ids(&adventures);
        let expected_ids = selection.clone();
        let crown = PrizeType::new(PrizeName::new("Crown").unwrap(), Rarity::Elite, 1);

        let mut uow = MockUnitOfWork::new();
        uow.expect_get_adventures()
            .returning(move |_| Ok(adventures.clone()));
        uow.expect_consume_materials()
            .withf(move |owner, ids| *owner == user_id && ids == expected_ids.as_slice())
            .times(1)
            .returning(|_, ids| Ok(ids.len() as u64));
        uow.expect_insert_loot_box()
            .withf(move |b| b.user_id() == user_id && b.rarity() == Rarity::Elite)
            .times(1)
            .returning(|_| Ok(()));
        uow.expect_first_available_prize_type()
            .withf(|rarity| *rarity == Rarity::Elite)
            .returning(move |_| Ok(Some(crown.clone())));
        uow.expect_claim_prize_unit().returning(|_| Ok(true));
        uow.expect_insert_prize().times(1).returning(|_| Ok(()));

        let forged = forger().forge(&mut uow, &user, &selection).await.unwrap();

        assert_eq!(forged.loot_box.rarity(), Rarity::Elite);
        match forged.prize {
            PrizeOutcome::Awarded { prize, .. } => {
                assert_eq!(prize.loot_box_id(), forged.loot_box.id())
            }
            other => panic!("expected award, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unavailable_prize_still_forges() {
        let user = test_user();
        let adventures = materials(user.id(), [150, 160, 170, 160, 150]);
        let selection = ids(&adventures);

        let mut uow = MockUnitOfWork::new();
        uow.expect_get_adventures()
            .returning(move |_| Ok(adventures.clone()));
        uow.expect_consume_materials()
            .returning(|_, ids| Ok(ids.len() as u64));
        uow.expect_insert_loot_box().times(1).returning(|_| Ok(()));
        uow.expect_first_available_prize_type().returning(|_| Ok(None));

        let forged = forger().forge(&mut uow, &user, &selection).await.unwrap();

        assert_eq!(forged.loot_box.rarity(), Rarity::Common);
        assert_eq!(
            forged.prize,
            PrizeOutcome::Unavailable {
                rarity: Rarity::Common
            }
        );
    }
}
