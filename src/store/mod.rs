//! The per-entity metadata channel.
//!
//! The lock lives in the host's metadata layer as one opaque string per
//! entity under a fixed key. [`MetaStore`] is the seam the host implements;
//! two implementations ship with the crate:
//!
//! - [`MemoryMetaStore`]: process-local, for embedding and tests
//! - [`FileMetaStore`]: a JSON document on disk, re-read on every call
//!
//! Stores never cache across calls, so a lock written by a concurrent
//! request is visible to the next check.

mod file;
mod memory;

#[cfg(test)]
mod tests;

use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use file::FileMetaStore;
pub use memory::MemoryMetaStore;

/// Identifier of an entity (a taxonomy term) in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId(id)
    }
}

/// Key/value persistence scoped to an entity id.
pub trait MetaStore {
    /// Read the value stored under `key`, or `None` when nothing is stored.
    fn get_meta(&self, entity: EntityId, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_meta(&self, entity: EntityId, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    fn delete_meta(&self, entity: EntityId, key: &str) -> Result<()>;

    /// Remove every value stored for `entity`.
    fn purge_entity(&self, entity: EntityId) -> Result<()>;

    /// Ids of all entities with at least one stored value, ascending.
    fn entity_ids(&self) -> Result<Vec<EntityId>>;
}
