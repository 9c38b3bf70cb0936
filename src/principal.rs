//! Acting principals and the collaborator seams used to identify them.
//!
//! A principal id of `0` means "no identifiable actor". Such a principal never
//! matches a lock owner and is denied on every locked entity.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier of a principal. `0` is reserved for "unresolved".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(pub u64);

impl PrincipalId {
    /// The reserved "no identity" value.
    pub const NONE: PrincipalId = PrincipalId(0);

    /// Whether this id names a real principal.
    pub fn is_resolved(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PrincipalId {
    fn from(id: u64) -> Self {
        PrincipalId(id)
    }
}

/// The acting identity for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Principal {
    pub id: PrincipalId,
}

impl Principal {
    pub fn new(id: impl Into<PrincipalId>) -> Self {
        Self { id: id.into() }
    }

    /// A principal with no resolvable identity.
    pub fn anonymous() -> Self {
        Self {
            id: PrincipalId::NONE,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.id.is_resolved()
    }
}

/// Resolves the principal acting in the current request.
pub trait PrincipalResolver {
    /// Returns the acting principal, or [`Principal::anonymous`] when unknown.
    fn current_principal(&self) -> Principal;
}

/// A resolver that always answers with the same principal.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrincipal(pub Principal);

impl PrincipalResolver for FixedPrincipal {
    fn current_principal(&self) -> Principal {
        self.0
    }
}

/// Environment variable naming the acting principal for the CLI.
pub const PRINCIPAL_ENV: &str = "TERMLOCK_PRINCIPAL";

/// Resolves the principal from an explicit id, else `TERMLOCK_PRINCIPAL`.
///
/// A missing or unparsable value resolves to the anonymous principal.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvPrincipal {
    explicit: Option<u64>,
}

impl EnvPrincipal {
    pub fn new(explicit: Option<u64>) -> Self {
        Self { explicit }
    }
}

impl PrincipalResolver for EnvPrincipal {
    fn current_principal(&self) -> Principal {
        let id = self.explicit.or_else(|| {
            std::env::var(PRINCIPAL_ENV)
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
        });
        id.map(Principal::new).unwrap_or_else(Principal::anonymous)
    }
}

/// The host's role/permission system.
pub trait CapabilityChecker {
    /// Whether `principal` holds the named capability.
    fn has_capability(&self, principal: &Principal, capability: &str) -> bool;

    /// Whether `principal` belongs to the super tier, which may also
    /// override with the super capability.
    fn is_super(&self, _principal: &Principal) -> bool {
        false
    }
}

/// Capability grants held in memory, keyed by principal id.
///
/// Backs the CLI, where grants come from the `grants` and
/// `super_principals` config sections.
#[derive(Debug, Clone, Default)]
pub struct GrantTable {
    grants: BTreeMap<PrincipalId, BTreeSet<String>>,
    supers: BTreeSet<PrincipalId>,
}

impl GrantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `capability` to `principal`.
    pub fn grant(mut self, principal: impl Into<PrincipalId>, capability: impl Into<String>) -> Self {
        self.grants
            .entry(principal.into())
            .or_default()
            .insert(capability.into());
        self
    }

    /// Place `principal` in the super tier.
    pub fn with_super(mut self, principal: impl Into<PrincipalId>) -> Self {
        self.supers.insert(principal.into());
        self
    }

    /// Build a table from raw config maps.
    pub fn from_parts(grants: &BTreeMap<u64, Vec<String>>, supers: &[u64]) -> Self {
        let mut table = Self::new();
        for (id, caps) in grants {
            for cap in caps {
                table = table.grant(*id, cap.clone());
            }
        }
        for id in supers {
            table = table.with_super(*id);
        }
        table
    }
}

impl CapabilityChecker for GrantTable {
    fn has_capability(&self, principal: &Principal, capability: &str) -> bool {
        // Anonymous actors never hold capabilities, whatever the table says.
        if !principal.is_resolved() {
            return false;
        }
        self.grants
            .get(&principal.id)
            .is_some_and(|caps| caps.contains(capability))
    }

    fn is_super(&self, principal: &Principal) -> bool {
        principal.is_resolved() && self.supers.contains(&principal.id)
    }
}
