//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Storage (could swap SQLite -> Postgres)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::{EconomyStore, UnitOfWork};
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockEconomyStore, MockUnitOfWork};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};
