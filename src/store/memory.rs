//! In-memory metadata store.

use super::{EntityId, MetaStore};
use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

type Table = BTreeMap<EntityId, BTreeMap<String, String>>;

/// A [`MetaStore`] held in process memory.
#[derive(Debug, Default)]
pub struct MemoryMetaStore {
    table: RwLock<Table>,
}

impl MemoryMetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written map entry,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(|poison| poison.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl MetaStore for MemoryMetaStore {
    fn get_meta(&self, entity: EntityId, key: &str) -> Result<Option<String>> {
        Ok(self
            .read()
            .get(&entity)
            .and_then(|fields| fields.get(key))
            .cloned())
    }

    fn set_meta(&self, entity: EntityId, key: &str, value: &str) -> Result<()> {
        self.write()
            .entry(entity)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_meta(&self, entity: EntityId, key: &str) -> Result<()> {
        let mut table = self.write();
        if let Some(fields) = table.get_mut(&entity) {
            fields.remove(key);
            if fields.is_empty() {
                table.remove(&entity);
            }
        }
        Ok(())
    }

    fn purge_entity(&self, entity: EntityId) -> Result<()> {
        self.write().remove(&entity);
        Ok(())
    }

    fn entity_ids(&self) -> Result<Vec<EntityId>> {
        Ok(self.read().keys().copied().collect())
    }
}
