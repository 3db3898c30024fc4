//! greenroom-core: domain vocabulary shared by the Greenroom crates.
//!
//! Holds the closed set of entity kinds the overlay system can display,
//! configuration types with defaults/validation/file loading, and the
//! crate-wide error type.

pub mod config;
pub mod entity;
pub mod error;

pub use error::{GreenroomError, Result};

/// Crate identity label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "greenroom-core"
}
