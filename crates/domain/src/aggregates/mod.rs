//! Aggregates - entities that guard invariants over mutable state

pub mod prize_type;
pub mod user;

pub use prize_type::PrizeType;
pub use user::{User, DEFAULT_THRESHOLD, MISS_PENALTY, RESET_DECAY, THRESHOLD_FLOOR};
