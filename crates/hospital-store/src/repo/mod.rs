//! Repository layer bridging the in-memory `Store` and SQLite

pub mod hydration;
pub mod sqlite_repo;

pub use hydration::{load_store, persist_store};
pub use sqlite_repo::SqliteRepo;
