//! Read-only material queries: per-tier summary and adventure history.

mod error;

use std::sync::Arc;

use lootforge_domain::{Adventure, MaterialsSummary, User, UserId};

use crate::infrastructure::ports::{EconomyStore, UnitOfWork};
use crate::use_cases::finish;

pub use error::QueryError;

/// Container for material queries.
pub struct MaterialsUseCases {
    pub summary: Arc<GetMaterialsSummary>,
    pub history: Arc<GetAdventureHistory>,
}

impl MaterialsUseCases {
    pub fn new(summary: Arc<GetMaterialsSummary>, history: Arc<GetAdventureHistory>) -> Self {
        Self { summary, history }
    }
}

async fn require_user(uow: &mut dyn UnitOfWork, user_id: UserId) -> Result<User, QueryError> {
    uow.get_user(user_id)
        .await?
        .ok_or(QueryError::UserNotFound(user_id))
}

/// Count a user's materials per tier, split into used and unused.
pub struct GetMaterialsSummary {
    store: Arc<dyn EconomyStore>,
}

impl GetMaterialsSummary {
    pub fn new(store: Arc<dyn EconomyStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<MaterialsSummary, QueryError> {
        let mut uow = self.store.begin().await?;
        let result = Self::run(uow.as_mut(), user_id).await;
        finish(uow, result).await
    }

    async fn run(
        uow: &mut dyn UnitOfWork,
        user_id: UserId,
    ) -> Result<MaterialsSummary, QueryError> {
        require_user(uow, user_id).await?;
        let adventures = uow.list_adventures(user_id).await?;
        Ok(MaterialsSummary::from_adventures(&adventures))
    }
}

/// A user's adventures, newest first.
pub struct GetAdventureHistory {
    store: Arc<dyn EconomyStore>,
}

impl GetAdventureHistory {
    pub fn new(store: Arc<dyn EconomyStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<Vec<Adventure>, QueryError> {
        let mut uow = self.store.begin().await?;
        let result = Self::run(uow.as_mut(), user_id).await;
        finish(uow, result).await
    }

    async fn run(uow: &mut dyn UnitOfWork, user_id: UserId) -> Result<Vec<Adventure>, QueryError> {
        require_user(uow, user_id).await?;
        Ok(uow.list_adventures(user_id).await?)
    }
}
