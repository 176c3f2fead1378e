//! LootForge Engine library.
//!
//! This crate contains all server-side code for the LootForge economy.
//!
//! ## Structure
//!
//! - `use_cases/` - Drafting, forging, allocation and queries
//! - `infrastructure/` - Ports plus the SQLite, clock and config adapters
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end tests against a real SQLite database.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
