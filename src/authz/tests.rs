//! Tests for the authorization engine.

use super::*;
use crate::config::GuardConfig;
use crate::principal::{GrantTable, Principal};
use crate::test_support::{AllCapabilities, NoCapabilities};
use std::cell::Cell;

const CAP: &str = "manage_others_term_locks";

/// Counts capability lookups, to prove short-circuit ordering.
struct CountingChecker {
    answer: bool,
    calls: Cell<u32>,
}

impl CountingChecker {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            calls: Cell::new(0),
        }
    }
}

impl CapabilityChecker for CountingChecker {
    fn has_capability(&self, _principal: &Principal, _capability: &str) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.answer
    }
}

#[test]
fn test_owner_allowed_without_capability() {
    let decision = evaluate(CAP, Some("1700000000:42"), &Principal::new(42), &NoCapabilities);
    assert_eq!(decision, Decision::Allow(AllowReason::Owner));
}

#[test]
fn test_non_owner_without_capability_denied() {
    let decision = evaluate(CAP, Some("1700000000:42"), &Principal::new(7), &NoCapabilities);
    assert_eq!(decision, Decision::Deny(DenyReason::NotOwner));
}

#[test]
fn test_non_owner_with_capability_allowed() {
    let decision = evaluate(CAP, Some("1700000000:42"), &Principal::new(7), &AllCapabilities);
    assert_eq!(decision, Decision::Allow(AllowReason::Override));
}

#[test]
fn test_unlocked_allows_everyone() {
    let principals = [Principal::anonymous(), Principal::new(1), Principal::new(42)];
    for principal in &principals {
        for lock in [None, Some("")] {
            assert!(can_act(CAP, lock, principal, &NoCapabilities));
            assert!(can_act("anything_else", lock, principal, &AllCapabilities));
            assert_eq!(
                evaluate(CAP, lock, principal, &NoCapabilities),
                Decision::Allow(AllowReason::Unlocked)
            );
        }
    }
}

#[test]
fn test_anonymous_denied_on_locked_even_with_capability() {
    for lock in ["1700000000:42", "1700000000", "1:0", "junk"] {
        let checker = CountingChecker::new(true);
        let decision = evaluate(CAP, Some(lock), &Principal::anonymous(), &checker);

        assert_eq!(decision, Decision::Deny(DenyReason::UnresolvedPrincipal));
        // Identity failure short-circuits before the capability lookup.
        assert_eq!(checker.calls.get(), 0, "lock {:?}", lock);
    }
}

#[test]
fn test_owner_match_skips_capability_lookup() {
    let checker = CountingChecker::new(false);
    assert!(can_act(CAP, Some("5:42"), &Principal::new(42), &checker));
    assert_eq!(checker.calls.get(), 0);
}

#[test]
fn test_malformed_lock_denies_everyone_but_capability_holders() {
    for lock in ["1700000000", "1700000000:abc", "1:2:3"] {
        assert!(!can_act(CAP, Some(lock), &Principal::new(2), &NoCapabilities));
        assert!(can_act(CAP, Some(lock), &Principal::new(2), &AllCapabilities));
    }
}

#[test]
fn test_capability_name_is_passed_through() {
    let grants = GrantTable::new().grant(7, "delete_locked");

    assert!(can_act("delete_locked", Some("1:42"), &Principal::new(7), &grants));
    assert!(!can_act(CAP, Some("1:42"), &Principal::new(7), &grants));
}

#[test]
fn test_override_iff_capability_held() {
    let grants = GrantTable::new().grant(7, CAP);
    for id in 1..=10u64 {
        let principal = Principal::new(id);
        assert_eq!(
            can_act(CAP, Some("1:42"), &principal, &grants),
            grants.has_capability(&principal, CAP)
        );
    }
}

#[test]
fn test_evaluate_is_idempotent() {
    let grants = GrantTable::new().grant(7, CAP);
    let inputs = [
        (Some("1:42"), Principal::new(42)),
        (Some("1:42"), Principal::new(7)),
        (Some("1:42"), Principal::new(8)),
        (None, Principal::anonymous()),
    ];
    for (lock, principal) in inputs {
        let first = evaluate(CAP, lock, &principal, &grants);
        let second = evaluate(CAP, lock, &principal, &grants);
        assert_eq!(first, second);
    }
}

#[test]
fn test_decision_labels() {
    assert_eq!(Decision::Allow(AllowReason::Override).label(), "override");
    assert_eq!(Decision::Deny(DenyReason::NotOwner).label(), "not_owner");
    assert!(!Decision::Deny(DenyReason::UnresolvedPrincipal).is_allowed());
}

#[test]
fn test_holds_override_per_slot() {
    let mut config = GuardConfig::default();
    config.capabilities.delete = "delete_locked".to_string();
    let grants = GrantTable::new().grant(5, "delete_locked");
    let principal = Principal::new(5);

    assert!(holds_override(&config, GuardAction::Delete, &principal, &grants));
    assert!(!holds_override(&config, GuardAction::Update, &principal, &grants));
}

#[test]
fn test_holds_override_super_tier() {
    let config = GuardConfig::default();
    let super_only = GrantTable::new().with_super(1).grant(1, "manage_categories");
    let slot_and_super = GrantTable::new().with_super(1).grant(1, CAP);
    let bare_super = GrantTable::new().with_super(1);
    let not_super = GrantTable::new().grant(2, "manage_categories");

    for action in [GuardAction::Delete, GuardAction::Update, GuardAction::Manage] {
        assert!(holds_override(&config, action, &Principal::new(1), &super_only));
        assert!(holds_override(&config, action, &Principal::new(1), &slot_and_super));
        assert!(!holds_override(&config, action, &Principal::new(1), &bare_super));
        assert!(!holds_override(&config, action, &Principal::new(2), &not_super));
    }
}

#[test]
fn test_evaluate_with_only_asks_for_override_on_foreign_lock() {
    let asked = Cell::new(0);
    let ask = |_: &Principal| {
        asked.set(asked.get() + 1);
        true
    };

    evaluate_with(None, &Principal::new(7), ask);
    evaluate_with(Some("1700000000:42"), &Principal::anonymous(), ask);
    evaluate_with(Some("1700000000:42"), &Principal::new(42), ask);
    assert_eq!(asked.get(), 0);

    let decision = evaluate_with(Some("1700000000:42"), &Principal::new(7), ask);
    assert_eq!(decision, Decision::Allow(AllowReason::Override));
    assert_eq!(asked.get(), 1);
}
