//! Infrastructure layer: database, alternative storage backends

pub mod database;
pub mod storage;

pub use database::{init_database, DatabaseConfig};
pub use storage::InMemoryStore;
