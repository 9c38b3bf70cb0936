//! Configuration model for termlock.
//!
//! This module defines the GuardConfig struct that represents `config.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::GuardConfig;
pub use operations::CategoryMatcher;
pub use types::{CapabilityMap, GuardAction, MessageMap, RefusalMessage};
