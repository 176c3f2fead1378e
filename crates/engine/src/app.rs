//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, EconomyStore, RandomPort};
use crate::use_cases::{
    adventure::{AdventureDrafter, PerformAdventure},
    lootbox::{ForgeLootbox, LootboxForger},
    management::{AddPrizeType, ListPrizeTypes, RegisterUser, SeedCatalog},
    materials::{GetAdventureHistory, GetMaterialsSummary},
    prize::PrizeAllocator,
    AdventureUseCases, LootboxUseCases, ManagementUseCases, MaterialsUseCases,
};

/// Main application state.
///
/// Holds all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub adventure: AdventureUseCases,
    pub lootbox: LootboxUseCases,
    pub materials: MaterialsUseCases,
    pub management: ManagementUseCases,
}

impl App {
    /// Wire every use case to the given store, clock and random source.
    pub fn new(
        store: Arc<dyn EconomyStore>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let drafter = Arc::new(AdventureDrafter::new(clock.clone(), random));
        let allocator = Arc::new(PrizeAllocator::new(clock.clone()));
        let forger = Arc::new(LootboxForger::new(clock.clone(), allocator));

        let adventure = AdventureUseCases::new(Arc::new(PerformAdventure::new(
            store.clone(),
            drafter,
            clock.clone(),
        )));

        let lootbox = LootboxUseCases::new(Arc::new(ForgeLootbox::new(store.clone(), forger)));

        let materials = MaterialsUseCases::new(
            Arc::new(GetMaterialsSummary::new(store.clone())),
            Arc::new(GetAdventureHistory::new(store.clone())),
        );

        let management = ManagementUseCases::new(
            Arc::new(RegisterUser::new(store.clone(), clock)),
            Arc::new(AddPrizeType::new(store.clone())),
            Arc::new(ListPrizeTypes::new(store.clone())),
            Arc::new(SeedCatalog::new(store)),
        );

        Self {
            use_cases: UseCases {
                adventure,
                lootbox,
                materials,
                management,
            },
        }
    }
}
