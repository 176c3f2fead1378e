//! Adventure use cases.

mod drafter;
mod error;
mod perform_adventure;

use std::sync::Arc;

pub use drafter::AdventureDrafter;
pub use error::AdventureError;
pub use perform_adventure::PerformAdventure;

/// Container for adventure use cases.
pub struct AdventureUseCases {
    pub perform: Arc<PerformAdventure>,
}

impl AdventureUseCases {
    pub fn new(perform: Arc<PerformAdventure>) -> Self {
        Self { perform }
    }
}
