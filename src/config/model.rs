//! GuardConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the lock guards.
///
/// This struct represents the contents of `config.yaml` in the state
/// directory. Every capability name and message that a host would
/// otherwise filter at runtime is injected here instead.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    // =========================================================================
    // Storage
    // =========================================================================
    /// Logical key of the lock value in the metadata channel.
    #[serde(default = "default_meta_key")]
    pub meta_key: String,

    /// Glob patterns of categories the guards apply to.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    // =========================================================================
    // Capabilities
    // =========================================================================
    /// Override capability per guard action.
    #[serde(default)]
    pub capabilities: CapabilityMap,

    /// Capability accepted in every slot from super-tier principals.
    #[serde(default = "default_super_capability")]
    pub super_capability: String,

    // =========================================================================
    // Refusals
    // =========================================================================
    /// Full-page refusal wording per guard action.
    #[serde(default)]
    pub messages: MessageMap,

    /// Inline error string returned to background requests.
    #[serde(default = "default_background_message")]
    pub background_message: String,

    // =========================================================================
    // List rendering
    // =========================================================================
    /// Row actions kept when the principal cannot act on a locked entity.
    #[serde(default = "default_allowed_row_actions")]
    pub allowed_row_actions: Vec<String>,

    /// Remove the bulk `delete` action from guarded list tables.
    #[serde(default = "default_true")]
    pub strip_bulk_delete: bool,

    /// Marker appended to a locked name the principal cannot override.
    #[serde(default = "default_lock_indicator")]
    pub lock_indicator: String,

    /// Marker appended to a locked name the principal can act on.
    #[serde(default = "default_unlock_indicator")]
    pub unlock_indicator: String,

    // =========================================================================
    // Grants (CLI capability checker)
    // =========================================================================
    /// Capabilities granted per principal id.
    #[serde(default)]
    pub grants: BTreeMap<u64, Vec<String>>,

    /// Principal ids in the super tier.
    #[serde(default)]
    pub super_principals: Vec<u64>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            meta_key: default_meta_key(),
            categories: default_categories(),
            capabilities: CapabilityMap::default(),
            super_capability: default_super_capability(),
            messages: MessageMap::default(),
            background_message: default_background_message(),
            allowed_row_actions: default_allowed_row_actions(),
            strip_bulk_delete: default_true(),
            lock_indicator: default_lock_indicator(),
            unlock_indicator: default_unlock_indicator(),
            grants: BTreeMap::new(),
            super_principals: Vec::new(),
        }
    }
}
