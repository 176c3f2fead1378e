//! Management use cases: player registration and the prize catalog.

mod error;
mod prize_types;
mod users;

use std::sync::Arc;

pub use error::ManagementError;
pub use prize_types::{AddPrizeType, ListPrizeTypes, SeedCatalog};
pub use users::RegisterUser;

/// Container for management use cases.
pub struct ManagementUseCases {
    pub register_user: Arc<RegisterUser>,
    pub add_prize_type: Arc<AddPrizeType>,
    pub list_prize_types: Arc<ListPrizeTypes>,
    pub seed_catalog: Arc<SeedCatalog>,
}

impl ManagementUseCases {
    pub fn new(
        register_user: Arc<RegisterUser>,
        add_prize_type: Arc<AddPrizeType>,
        list_prize_types: Arc<ListPrizeTypes>,
        seed_catalog: Arc<SeedCatalog>,
    ) -> Self {
        Self {
            register_user,
            add_prize_type,
            list_prize_types,
            seed_catalog,
        }
    }
}
