//! Prize catalog maintenance.

use std::sync::Arc;

use lootforge_domain::{PrizeName, PrizeType, Rarity};
use lootforge_shared::CreatePrizeTypeRequest;

use crate::infrastructure::ports::{EconomyStore, UnitOfWork};
use crate::use_cases::finish;

use super::error::ManagementError;

/// Append a prize type to the end of the catalog.
pub struct AddPrizeType {
    store: Arc<dyn EconomyStore>,
}

impl AddPrizeType {
    pub fn new(store: Arc<dyn EconomyStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        name: &str,
        rarity: Rarity,
        quantity: u32,
    ) -> Result<PrizeType, ManagementError> {
        let prize_type = PrizeType::new(PrizeName::new(name)?, rarity, quantity);

        let mut uow = self.store.begin().await?;
        let result = uow
            .insert_prize_type(&prize_type)
            .await
            .map_err(ManagementError::from);
        finish(uow, result).await?;

        tracing::info!(
            prize_type_id = %prize_type.id(),
            name = %prize_type.name(),
            %rarity,
            quantity,
            "Prize type added"
        );
        Ok(prize_type)
    }
}

/// The whole catalog in insertion order.
pub struct ListPrizeTypes {
    store: Arc<dyn EconomyStore>,
}

impl ListPrizeTypes {
    pub fn new(store: Arc<dyn EconomyStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<Vec<PrizeType>, ManagementError> {
        let mut uow = self.store.begin().await?;
        let result = uow.list_prize_types().await.map_err(ManagementError::from);
        finish(uow, result).await
    }
}

/// Load an initial catalog, but only into an empty one.
pub struct SeedCatalog {
    store: Arc<dyn EconomyStore>,
}

impl SeedCatalog {
    pub fn new(store: Arc<dyn EconomyStore>) -> Self {
        Self { store }
    }

    /// Insert `entries` in order if the catalog is empty.
    ///
    /// Returns how many prize types were inserted. Either every entry is
    /// inserted or none is.
    pub async fn execute(
        &self,
        entries: &[CreatePrizeTypeRequest],
    ) -> Result<usize, ManagementError> {
        let prize_types = entries
            .iter()
            .map(|entry| {
                Ok(PrizeType::new(
                    PrizeName::new(entry.name.as_str())?,
                    entry.rarity,
                    entry.quantity,
                ))
            })
            .collect::<Result<Vec<_>, ManagementError>>()?;

        let mut uow = self.store.begin().await?;
        let result = Self::seed_into(uow.as_mut(), &prize_types).await;
        let inserted = finish(uow, result).await?;

        if inserted == 0 {
            tracing::info!("Prize catalog already populated, skipping seed");
        } else {
            tracing::info!(count = inserted, "Prize catalog seeded");
        }
        Ok(inserted)
    }

    async fn seed_into(
        uow: &mut dyn UnitOfWork,
        prize_types: &[PrizeType],
    ) -> Result<usize, ManagementError> {
        if !uow.list_prize_types().await?.is_empty() {
            return Ok(0);
        }
        for prize_type in prize_types {
            uow.insert_prize_type(prize_type).await?;
        }
        Ok(prize_types.len())
    }
}
