//! Value objects - Immutable objects defined by their attributes

mod materials_summary;
mod names;
mod rarity;

pub use materials_summary::MaterialsSummary;
pub use names::{PrizeName, Username};
pub use rarity::{material_label, Rarity, NO_MATERIAL_LABEL};
