//! Backend E2E integration tests.
//!
//! These tests validate the full economy loop using:
//! - A real SQLite database in a temporary directory
//! - Complete App construction with all use cases
//! - Deterministic clock and random doubles
//!
//! # Running E2E Tests
//!
//! ```bash
//! cargo test -p lootforge-engine --lib e2e_tests
//! ```

mod e2e_helpers;
mod http_api_tests;

pub use e2e_helpers::*;
