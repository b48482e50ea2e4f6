//! Migration framework
//!
//! Embedded SQL migrations applied once each, recorded with a SHA-256
//! checksum in `schema_version`.

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
