//! E2E test helpers for constructing the full application stack.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use lootforge_domain::{Adventure, LootBox, PrizeType, Rarity, User, UserId};

use crate::app::App;
use crate::infrastructure::clock::{SequenceRandom, SteppingClock};
use crate::infrastructure::ports::EconomyStore;
use crate::infrastructure::sqlite::SqliteEconomyStore;

/// Start of simulated time for every E2E test.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// A fully wired economy on a throwaway database.
pub struct TestEconomy {
    pub app: Arc<App>,
    pub store: Arc<SqliteEconomyStore>,
    pub clock: Arc<SteppingClock>,
    // Keeps the database directory alive for the test's duration
    _dir: TempDir,
}

impl TestEconomy {
    /// Build an economy whose adventure draws replay `scores` in order.
    pub async fn with_scores(scores: Vec<i32>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(
            SqliteEconomyStore::open(dir.path().join("e2e.db"), Duration::from_secs(5))
                .await
                .unwrap(),
        );
        let clock = Arc::new(SteppingClock::new(epoch()));
        let app = Arc::new(App::new(
            store.clone(),
            clock.clone(),
            Arc::new(SequenceRandom::new(scores)),
        ));
        Self {
            app,
            store,
            clock,
            _dir: dir,
        }
    }

    pub async fn register(&self, username: &str) -> User {
        self.app
            .use_cases
            .management
            .register_user
            .execute(username)
            .await
            .unwrap()
    }

    pub async fn add_prize_type(&self, name: &str, rarity: Rarity, quantity: u32) -> PrizeType {
        self.app
            .use_cases
            .management
            .add_prize_type
            .execute(name, rarity, quantity)
            .await
            .unwrap()
    }

    /// Insert unused materials directly, bypassing the cooldown.
    pub async fn seed_materials(&self, user_id: UserId, scores: &[i32]) -> Vec<Adventure> {
        let adventures: Vec<Adventure> = scores
            .iter()
            .map(|score| Adventure::drafted(user_id, *score, epoch()))
            .collect();
        let mut uow = self.store.begin().await.unwrap();
        for adventure in &adventures {
            uow.insert_adventure(adventure).await.unwrap();
        }
        uow.commit().await.unwrap();
        adventures
    }

    /// Insert lootboxes directly so prizes have something to point at.
    pub async fn seed_loot_boxes(
        &self,
        user_id: UserId,
        rarity: Rarity,
        count: usize,
    ) -> Vec<LootBox> {
        let boxes: Vec<LootBox> = (0..count)
            .map(|_| LootBox::new(user_id, rarity, epoch()))
            .collect();
        let mut uow = self.store.begin().await.unwrap();
        for loot_box in &boxes {
            uow.insert_loot_box(loot_box).await.unwrap();
        }
        uow.commit().await.unwrap();
        boxes
    }

    pub async fn prize_type(&self, name: &str) -> PrizeType {
        let catalog = self
            .app
            .use_cases
            .management
            .list_prize_types
            .execute()
            .await
            .unwrap();
        catalog
            .into_iter()
            .find(|pt| pt.name().to_string() == name)
            .unwrap()
    }
}
