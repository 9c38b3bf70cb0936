//! Config loading, validation, and lookup operations.

use super::model::GuardConfig;
use super::types::{GuardAction, RefusalMessage};
use crate::error::{Result, TermLockError};
use crate::principal::GrantTable;
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static CAPABILITY_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("Invalid capability name regex"));

impl GuardConfig {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(GuardConfig)` - Successfully loaded and validated config
    /// * `Err(TermLockError::UserError)` - The file could not be read
    /// * `Err(TermLockError::ConfigError)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            TermLockError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: GuardConfig = serde_yaml::from_str(yaml)
            .map_err(|e| TermLockError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            TermLockError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `meta_key` must be non-empty
    /// - every capability name (slots and `super_capability`) must be a
    ///   lowercase identifier
    /// - every `categories` entry must compile as a glob
    /// - `allowed_row_actions` entries must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.meta_key.trim().is_empty() {
            return Err(TermLockError::ConfigError(
                "meta_key must not be empty".to_string(),
            ));
        }

        for (action, capability) in self.capabilities.iter() {
            check_capability_name(&format!("capabilities.{}", action), capability)?;
        }
        check_capability_name("super_capability", &self.super_capability)?;

        for (id, caps) in &self.grants {
            for cap in caps {
                check_capability_name(&format!("grants.{}", id), cap)?;
            }
        }

        self.category_matcher()?;

        if self.allowed_row_actions.iter().any(|a| a.trim().is_empty()) {
            return Err(TermLockError::ConfigError(
                "allowed_row_actions entries must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The override capability slot for `action`.
    pub fn capability_for(&self, action: GuardAction) -> &str {
        self.capabilities.get(action)
    }

    /// The refusal wording for `action`.
    pub fn message_for(&self, action: GuardAction) -> &RefusalMessage {
        self.messages.get(action)
    }

    /// Compile the `categories` patterns.
    pub fn category_matcher(&self) -> Result<CategoryMatcher> {
        CategoryMatcher::new(&self.categories)
    }

    /// Capability grants declared in this config.
    pub fn grant_table(&self) -> GrantTable {
        GrantTable::from_parts(&self.grants, &self.super_principals)
    }
}

fn check_capability_name(field: &str, name: &str) -> Result<()> {
    if !CAPABILITY_NAME_REGEX.is_match(name) {
        return Err(TermLockError::ConfigError(format!(
            "{} must be a lowercase capability name (found '{}')",
            field, name
        )));
    }
    Ok(())
}

/// Compiled set of category globs.
#[derive(Debug, Clone)]
pub struct CategoryMatcher {
    set: GlobSet,
}

impl CategoryMatcher {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                TermLockError::ConfigError(format!(
                    "invalid glob pattern in categories '{}': {}",
                    pattern, e
                ))
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| {
            TermLockError::ConfigError(format!("failed to build categories globset: {}", e))
        })?;
        Ok(Self { set })
    }

    /// Whether the guards apply to entities of `category`.
    pub fn is_guarded(&self, category: &str) -> bool {
        self.set.is_match(category)
    }
}
