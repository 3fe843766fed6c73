//! Shared types for the contract dashboard
//!
//! Contains the wire data model delivered by the contract data source,
//! the shared error type and the logging setup used by every binary.
//! Component-internal types (query views, upload entries) are kept
//! in their respective crates.

pub mod types;
pub mod errors;
pub mod logging;

pub use types::*;
pub use errors::*;
