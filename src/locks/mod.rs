//! Lock records and their storage.
//!
//! A lock is a plain metadata value, `"<timestamp>:<owner-id>"`, stored per
//! entity under a fixed key (default `_term_lock`). Nothing here performs
//! mutual exclusion: two principals locking the same unlocked entity at once
//! both succeed and the last write wins. The lock only matters when a guard
//! evaluates it.
//!
//! # Lifecycle
//!
//! - Created by [`LockStoreAdapter::create_lock`] for a principal with an
//!   identity; an anonymous principal yields an empty value (no lock).
//! - Overwritten by re-submission through the same path.
//! - Gone when the entity's metadata is removed or an empty value is stored.

mod adapter;
mod record;


// Re-export public API
pub use adapter::{LockStoreAdapter, LockValueFilter};
pub use record::LockRecord;
