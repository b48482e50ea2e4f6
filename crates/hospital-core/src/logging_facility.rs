//! Structured logging facility
//!
//! - One initialisation point, `init(profile)`
//! - Operation macros `log_op_start!`, `log_op_end!`, `log_op_error!` that
//!   emit the canonical `component`/`op`/`event` fields
//! - An in-memory capture layer for assertions in tests
//!
//! Only the engine layer emits start/end events; core and store code log
//! with plain `tracing::debug!`.
//!
//! ```rust
//! use hospital_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
