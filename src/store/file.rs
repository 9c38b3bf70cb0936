//! JSON-file metadata store.
//!
//! The whole table lives in one document:
//!
//! ```json
//! { "entities": { "12": { "_term_lock": "1700000000:42" } } }
//! ```
//!
//! Every read loads the file again; every write replaces it atomically.
//! Concurrent writers follow last-write-wins, like the host metadata layer.

use super::{EntityId, MetaStore};
use crate::error::{Result, TermLockError};
use crate::fs::atomic_write_file;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct MetaDocument {
    #[serde(default)]
    entities: BTreeMap<u64, BTreeMap<String, String>>,
}

/// A [`MetaStore`] persisted as a JSON document.
#[derive(Debug, Clone)]
pub struct FileMetaStore {
    path: PathBuf,
}

impl FileMetaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<MetaDocument> {
        if !self.path.exists() {
            return Ok(MetaDocument::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            TermLockError::StoreError(format!(
                "failed to read metadata file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(MetaDocument::default());
        }

        serde_json::from_str(&content).map_err(|e| {
            TermLockError::StoreError(format!(
                "failed to parse metadata file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, doc: &MetaDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(doc).map_err(|e| {
            TermLockError::StoreError(format!("failed to serialize metadata: {}", e))
        })?;
        atomic_write_file(&self.path, &json)
    }

    fn mutate(&self, f: impl FnOnce(&mut MetaDocument)) -> Result<()> {
        let mut doc = self.load()?;
        f(&mut doc);
        self.save(&doc)
    }
}

impl MetaStore for FileMetaStore {
    fn get_meta(&self, entity: EntityId, key: &str) -> Result<Option<String>> {
        let doc = self.load()?;
        Ok(doc
            .entities
            .get(&entity.0)
            .and_then(|fields| fields.get(key))
            .cloned())
    }

    fn set_meta(&self, entity: EntityId, key: &str, value: &str) -> Result<()> {
        self.mutate(|doc| {
            doc.entities
                .entry(entity.0)
                .or_default()
                .insert(key.to_string(), value.to_string());
        })
    }

    fn delete_meta(&self, entity: EntityId, key: &str) -> Result<()> {
        self.mutate(|doc| {
            if let Some(fields) = doc.entities.get_mut(&entity.0) {
                fields.remove(key);
                if fields.is_empty() {
                    doc.entities.remove(&entity.0);
                }
            }
        })
    }

    fn purge_entity(&self, entity: EntityId) -> Result<()> {
        self.mutate(|doc| {
            doc.entities.remove(&entity.0);
        })
    }

    fn entity_ids(&self) -> Result<Vec<EntityId>> {
        Ok(self.load()?.entities.keys().map(|id| EntityId(*id)).collect())
    }
}
