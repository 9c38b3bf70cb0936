//! Authorization Engine.
//!
//! Pure decision logic: given the raw lock value of an entity, the acting
//! principal and an override capability, decide allow or deny. No I/O and no
//! caching; callers re-read the lock before every check.
//!
//! The checks run in a fixed order:
//!
//! 1. no lock: allow
//! 2. parse the lock; a missing or malformed owner becomes owner `0`
//! 3. principal has no identity: deny
//! 4. principal owns the lock: allow
//! 5. principal holds the override capability: allow
//! 6. otherwise: deny
//!
//! An unresolved principal is rejected before the capability checker is ever
//! consulted, and ownership is checked before the override.

#[cfg(test)]
mod tests;

use crate::config::{GuardAction, GuardConfig};
use crate::locks::LockRecord;
use crate::principal::{CapabilityChecker, Principal};

/// Why access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowReason {
    /// The entity's category is not covered by the guards.
    Unguarded,
    /// The entity carries no lock.
    Unlocked,
    /// The principal created the lock.
    Owner,
    /// The principal holds the override capability.
    Override,
}

/// Why access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The acting principal has no identity.
    UnresolvedPrincipal,
    /// Someone else holds the lock and the principal cannot override it.
    NotOwner,
}

/// Outcome of one authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow(AllowReason),
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }

    /// Short machine-readable label, used in audit events.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Allow(AllowReason::Unguarded) => "unguarded",
            Decision::Allow(AllowReason::Unlocked) => "unlocked",
            Decision::Allow(AllowReason::Owner) => "owner",
            Decision::Allow(AllowReason::Override) => "override",
            Decision::Deny(DenyReason::UnresolvedPrincipal) => "unresolved_principal",
            Decision::Deny(DenyReason::NotOwner) => "not_owner",
        }
    }
}

/// Evaluate `principal` against the raw lock value.
pub fn evaluate(
    capability: &str,
    lock_raw: Option<&str>,
    principal: &Principal,
    checker: &dyn CapabilityChecker,
) -> Decision {
    evaluate_with(lock_raw, principal, |principal| {
        checker.has_capability(principal, capability)
    })
}

/// Like [`evaluate`], but the override check is a callback.
///
/// `holds_override` runs only when a lock exists, the principal has an
/// identity and does not own the lock.
pub fn evaluate_with<F>(lock_raw: Option<&str>, principal: &Principal, holds_override: F) -> Decision
where
    F: FnOnce(&Principal) -> bool,
{
    let Some(lock) = LockRecord::parse_opt(lock_raw) else {
        return Decision::Allow(AllowReason::Unlocked);
    };

    if !principal.is_resolved() {
        return Decision::Deny(DenyReason::UnresolvedPrincipal);
    }

    if principal.id == lock.owner {
        return Decision::Allow(AllowReason::Owner);
    }

    if holds_override(principal) {
        return Decision::Allow(AllowReason::Override);
    }

    Decision::Deny(DenyReason::NotOwner)
}

/// Boolean form of [`evaluate`].
pub fn can_act(
    capability: &str,
    lock_raw: Option<&str>,
    principal: &Principal,
    checker: &dyn CapabilityChecker,
) -> bool {
    evaluate(capability, lock_raw, principal, checker).is_allowed()
}

/// Whether `principal` may override a foreign lock for `action`.
///
/// The slot capability always counts. Super-tier principals may also use
/// the configured super capability.
pub fn holds_override(
    config: &GuardConfig,
    action: GuardAction,
    principal: &Principal,
    checker: &dyn CapabilityChecker,
) -> bool {
    checker.has_capability(principal, config.capability_for(action))
        || (checker.is_super(principal)
            && checker.has_capability(principal, &config.super_capability))
}
