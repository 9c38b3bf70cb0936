//! Lock Store Adapter: reads and builds lock values over a [`MetaStore`].

use super::record::LockRecord;
use crate::error::Result;
use crate::principal::Principal;
use crate::store::{EntityId, MetaStore};
use chrono::Utc;

/// Transforms a freshly built lock value before it is returned for storage.
pub type LockValueFilter = Box<dyn Fn(String) -> String + Send + Sync>;

/// Reads and writes the lock value of an entity under one logical key.
pub struct LockStoreAdapter<S> {
    store: S,
    meta_key: String,
    filter: Option<LockValueFilter>,
}

impl<S: MetaStore> LockStoreAdapter<S> {
    pub fn new(store: S, meta_key: impl Into<String>) -> Self {
        Self {
            store,
            meta_key: meta_key.into(),
            filter: None,
        }
    }

    /// Install a filter applied to every value built by [`create_lock`](Self::create_lock).
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn meta_key(&self) -> &str {
        &self.meta_key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the raw lock value for `entity`.
    ///
    /// Absence and an empty stored value both read as `None`.
    pub fn get_lock(&self, entity: EntityId) -> Result<Option<String>> {
        Ok(self
            .store
            .get_meta(entity, &self.meta_key)?
            .filter(|raw| !raw.is_empty()))
    }

    /// Fetch and parse the lock for `entity`.
    pub fn read_record(&self, entity: EntityId) -> Result<Option<LockRecord>> {
        Ok(LockRecord::parse_opt(self.get_lock(entity)?.as_deref()))
    }

    /// Build the lock value for `principal` stamped with the current time.
    ///
    /// Returns an empty string when the principal has no identity; callers
    /// must treat that as "nothing to persist".
    pub fn create_lock(&self, principal: &Principal) -> String {
        self.create_lock_at(principal, Utc::now().timestamp())
    }

    /// Build the lock value for `principal` stamped with `timestamp`.
    pub fn create_lock_at(&self, principal: &Principal, timestamp: i64) -> String {
        if !principal.is_resolved() {
            return String::new();
        }

        let lock = LockRecord::new(principal.id, timestamp).serialize();
        match &self.filter {
            Some(filter) => filter(lock),
            None => lock,
        }
    }

    /// Persist a lock value for `entity`. An empty value is stored as-is and
    /// reads back as "no lock".
    pub fn store_lock(&self, entity: EntityId, value: &str) -> Result<()> {
        self.store.set_meta(entity, &self.meta_key, value)
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for LockStoreAdapter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockStoreAdapter")
            .field("store", &self.store)
            .field("meta_key", &self.meta_key)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}
