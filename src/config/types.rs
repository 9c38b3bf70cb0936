//! Configuration types and defaults for termlock.
//!
//! This module defines the guard action enum, the per-action capability and
//! message maps, and the default value functions used by the config struct.

use serde::{Deserialize, Serialize};

/// The default override capability for every guard action.
pub const DEFAULT_OVERRIDE_CAPABILITY: &str = "manage_others_term_locks";

/// Extra override capability accepted from super-tier principals.
pub const DEFAULT_SUPER_CAPABILITY: &str = "manage_categories";

/// The default logical key for the lock value.
pub const DEFAULT_META_KEY: &str = "_term_lock";

/// The class of a guarded operation. Each class has its own override
/// capability slot and refusal message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardAction {
    /// Removing an entity, and the bulk-select control that leads to it.
    Delete,
    /// Persisting a field change, including (re)submitting the lock itself.
    Update,
    /// Viewing the edit screen, row actions and the name annotation.
    Manage,
}

impl GuardAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardAction::Delete => "delete",
            GuardAction::Update => "update",
            GuardAction::Manage => "manage",
        }
    }
}

impl std::fmt::Display for GuardAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Override capability names, one slot per guard action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityMap {
    pub delete: String,
    pub update: String,
    pub manage: String,
}

impl Default for CapabilityMap {
    fn default() -> Self {
        Self {
            delete: DEFAULT_OVERRIDE_CAPABILITY.to_string(),
            update: DEFAULT_OVERRIDE_CAPABILITY.to_string(),
            manage: DEFAULT_OVERRIDE_CAPABILITY.to_string(),
        }
    }
}

impl CapabilityMap {
    pub fn get(&self, action: GuardAction) -> &str {
        match action {
            GuardAction::Delete => &self.delete,
            GuardAction::Update => &self.update,
            GuardAction::Manage => &self.manage,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (GuardAction, &str)> {
        [
            (GuardAction::Delete, self.delete.as_str()),
            (GuardAction::Update, self.update.as_str()),
            (GuardAction::Manage, self.manage.as_str()),
        ]
        .into_iter()
    }
}

/// Wording of a full-page refusal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefusalMessage {
    #[serde(default = "default_refusal_heading")]
    pub heading: String,
    pub body: String,
}

impl RefusalMessage {
    fn new(body: &str) -> Self {
        Self {
            heading: default_refusal_heading(),
            body: body.to_string(),
        }
    }
}

/// Refusal wording, one entry per guard action.
///
/// Each action's heading and body can be overridden on its own; whatever is
/// left out keeps the default wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MessageOverrides")]
pub struct MessageMap {
    pub delete: RefusalMessage,
    pub update: RefusalMessage,
    pub manage: RefusalMessage,
}

impl Default for MessageMap {
    fn default() -> Self {
        Self {
            delete: RefusalMessage::new(
                "One or more of the selected terms are locked. You are not allowed to delete.",
            ),
            update: RefusalMessage::new("This term is locked. You are not allowed to edit it."),
            manage: RefusalMessage::new("This term is locked. You are not allowed to manage it."),
        }
    }
}

/// Partial `messages` section as written in `config.yaml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MessageOverrides {
    delete: MessageOverride,
    update: MessageOverride,
    manage: MessageOverride,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MessageOverride {
    heading: Option<String>,
    body: Option<String>,
}

impl MessageOverride {
    fn apply(self, message: &mut RefusalMessage) {
        if let Some(heading) = self.heading {
            message.heading = heading;
        }
        if let Some(body) = self.body {
            message.body = body;
        }
    }
}

impl From<MessageOverrides> for MessageMap {
    fn from(overrides: MessageOverrides) -> Self {
        let mut messages = MessageMap::default();
        overrides.delete.apply(&mut messages.delete);
        overrides.update.apply(&mut messages.update);
        overrides.manage.apply(&mut messages.manage);
        messages
    }
}

impl MessageMap {
    pub fn get(&self, action: GuardAction) -> &RefusalMessage {
        match action {
            GuardAction::Delete => &self.delete,
            GuardAction::Update => &self.update,
            GuardAction::Manage => &self.manage,
        }
    }
}

// Default value functions for serde
pub(crate) fn default_refusal_heading() -> String {
    "Locked Term".to_string()
}
pub(crate) fn default_meta_key() -> String {
    DEFAULT_META_KEY.to_string()
}
pub(crate) fn default_categories() -> Vec<String> {
    vec!["*".to_string()]
}
pub(crate) fn default_super_capability() -> String {
    DEFAULT_SUPER_CAPABILITY.to_string()
}
pub(crate) fn default_background_message() -> String {
    "-1".to_string()
}
pub(crate) fn default_allowed_row_actions() -> Vec<String> {
    vec!["view".to_string()]
}
pub(crate) fn default_lock_indicator() -> String {
    "[locked]".to_string()
}
pub(crate) fn default_unlock_indicator() -> String {
    "[unlocked]".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
