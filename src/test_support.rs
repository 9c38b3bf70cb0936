//! Shared fixtures for unit tests.

use crate::config::GuardConfig;
use crate::guard::{GuardDispatcher, RequestContext, RequestMode};
use crate::principal::{CapabilityChecker, FixedPrincipal, GrantTable, Principal};
use crate::store::{EntityId, MemoryMetaStore, MetaStore};

/// A checker that grants nothing.
pub(crate) struct NoCapabilities;

impl CapabilityChecker for NoCapabilities {
    fn has_capability(&self, _principal: &Principal, _capability: &str) -> bool {
        false
    }
}

/// A checker that grants every capability to everyone, anonymous included.
pub(crate) struct AllCapabilities;

impl CapabilityChecker for AllCapabilities {
    fn has_capability(&self, _principal: &Principal, _capability: &str) -> bool {
        true
    }
}

pub(crate) type TestDispatcher = GuardDispatcher<MemoryMetaStore, GrantTable>;

/// Dispatcher with default config over an empty in-memory store.
pub(crate) fn dispatcher(grants: GrantTable) -> TestDispatcher {
    dispatcher_with(GuardConfig::default(), grants)
}

pub(crate) fn dispatcher_with(config: GuardConfig, grants: GrantTable) -> TestDispatcher {
    GuardDispatcher::new(MemoryMetaStore::new(), grants, config).unwrap()
}

/// Interactive request in the `category` category acting as `principal`.
pub(crate) fn request<S: MetaStore, C: CapabilityChecker>(
    guards: &GuardDispatcher<S, C>,
    principal: u64,
) -> RequestContext {
    guards.begin_request(
        &FixedPrincipal(Principal::new(principal)),
        "category",
        RequestMode::Interactive,
    )
}

/// Write a raw lock value straight into the store.
pub(crate) fn seed_lock<C: CapabilityChecker>(
    guards: &GuardDispatcher<MemoryMetaStore, C>,
    entity: u64,
    value: &str,
) {
    guards.locks().store_lock(EntityId(entity), value).unwrap();
}
