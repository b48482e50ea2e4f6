//! Hospital engine: orchestration layer
//!
//! Coordinates the in-memory kernel (`hospital-core`) with SQLite
//! persistence (`hospital-store`). Every mutating command runs as
//! load, apply, persist inside one transaction.

pub mod commands;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::engine_query::{apply_engine_query, EngineQuery, EngineQueryResult};
