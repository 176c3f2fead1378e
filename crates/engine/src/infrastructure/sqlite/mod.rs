//! SQLite storage adapter.

mod schema;
mod store;

pub use store::{SqliteEconomyStore, SqliteUnitOfWork};
