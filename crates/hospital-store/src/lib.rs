//! SQLite persistence for the hospital store
//!
//! Connection helpers, embedded migrations with checksums, and a repository
//! layer that hydrates a `hospital_core::Store` and writes it back.

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use errors::Result;
