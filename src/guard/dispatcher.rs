//! The Guard Dispatcher: one entry point per guarded operation.

use super::refusal::{GuardOutcome, Refusal, RequestMode};
use super::render::{RowActions, SelectionControl};
use super::request::RequestContext;
use crate::authz::{self, AllowReason, Decision};
use crate::config::{CategoryMatcher, GuardAction, GuardConfig};
use crate::error::Result;
use crate::locks::{LockRecord, LockStoreAdapter};
use crate::principal::{CapabilityChecker, PrincipalResolver};
use crate::store::{EntityId, MetaStore};

/// Bulk action removed from guarded list tables.
const BULK_DELETE: &str = "delete";

/// Result of submitting the lock field of an add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockSubmission {
    /// A lock was written for the acting principal.
    Created(LockRecord),
    /// The principal has no identity, so there was nothing to persist.
    NotCreated,
    /// The update guard refused the submission.
    Refused(Refusal),
}

/// Loads lock state, asks the authorization engine, and either passes the
/// operation through or produces a refusal.
///
/// Mutating operations (update, delete, screen access) refuse the whole
/// request. Rendering operations (row actions, name, checkbox, bulk actions)
/// only narrow what is shown.
pub struct GuardDispatcher<S, C> {
    locks: LockStoreAdapter<S>,
    checker: C,
    config: GuardConfig,
    categories: CategoryMatcher,
}

impl<S: MetaStore, C: CapabilityChecker> GuardDispatcher<S, C> {
    /// Build a dispatcher over `store`, validating `config` first.
    pub fn new(store: S, checker: C, config: GuardConfig) -> Result<Self> {
        config.validate()?;
        let categories = config.category_matcher()?;
        Ok(Self {
            locks: LockStoreAdapter::new(store, config.meta_key.clone()),
            checker,
            config,
            categories,
        })
    }

    /// Install a transform for newly created lock values.
    pub fn with_lock_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.locks = self.locks.with_filter(filter);
        self
    }

    pub fn locks(&self) -> &LockStoreAdapter<S> {
        &self.locks
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    /// Resolve the acting principal and category once for a request.
    pub fn begin_request(
        &self,
        resolver: &dyn PrincipalResolver,
        category: &str,
        mode: RequestMode,
    ) -> RequestContext {
        RequestContext {
            principal: resolver.current_principal(),
            category: category.to_string(),
            mode,
            guarded: self.categories.is_guarded(category),
        }
    }

    /// Evaluate `action` on `entity` for the request's principal.
    ///
    /// The lock is re-read from the store on every call.
    pub fn decide(
        &self,
        ctx: &RequestContext,
        action: GuardAction,
        entity: EntityId,
    ) -> Result<Decision> {
        if !ctx.guarded {
            return Ok(Decision::Allow(AllowReason::Unguarded));
        }

        let lock = self.locks.get_lock(entity)?;
        Ok(authz::evaluate_with(lock.as_deref(), &ctx.principal, |principal| {
            authz::holds_override(&self.config, action, principal, &self.checker)
        }))
    }

    fn check(
        &self,
        ctx: &RequestContext,
        action: GuardAction,
        entity: EntityId,
    ) -> Result<GuardOutcome> {
        Ok(match self.decide(ctx, action, entity)? {
            Decision::Allow(reason) => GuardOutcome::Allowed(reason),
            Decision::Deny(reason) => {
                GuardOutcome::Refused(Refusal::build(&self.config, action, reason, ctx.mode))
            }
        })
    }

    /// Guard run before a field change on `entity` is persisted.
    pub fn before_update(&self, ctx: &RequestContext, entity: EntityId) -> Result<GuardOutcome> {
        self.check(ctx, GuardAction::Update, entity)
    }

    /// Guard run before `entity` is removed.
    pub fn before_delete(&self, ctx: &RequestContext, entity: EntityId) -> Result<GuardOutcome> {
        self.check(ctx, GuardAction::Delete, entity)
    }

    /// Guard run before the management screen renders.
    ///
    /// Without an explicit target entity the screen is a list view and
    /// always passes.
    pub fn screen_access(
        &self,
        ctx: &RequestContext,
        target: Option<EntityId>,
    ) -> Result<GuardOutcome> {
        match target {
            Some(entity) => self.check(ctx, GuardAction::Manage, entity),
            None => Ok(GuardOutcome::Allowed(AllowReason::Unlocked)),
        }
    }

    /// Narrow the row actions of a locked entity to the allow-listed subset
    /// when the principal cannot manage it.
    pub fn row_actions(
        &self,
        ctx: &RequestContext,
        entity: EntityId,
        actions: RowActions,
    ) -> Result<RowActions> {
        if self.decide(ctx, GuardAction::Manage, entity)?.is_allowed() {
            return Ok(actions);
        }
        Ok(actions.retain_allowed(&self.config.allowed_row_actions))
    }

    /// Append the lock indicator to the display name of a locked entity.
    ///
    /// Never refuses. Unlocked entities keep their name; locked ones get the
    /// unlock marker when the principal could act on them and the lock
    /// marker otherwise.
    pub fn annotate_name(
        &self,
        ctx: &RequestContext,
        entity: EntityId,
        name: &str,
    ) -> Result<String> {
        let indicator = match self.decide(ctx, GuardAction::Manage, entity)? {
            Decision::Allow(AllowReason::Unguarded | AllowReason::Unlocked) => {
                return Ok(name.to_string());
            }
            Decision::Allow(_) => &self.config.unlock_indicator,
            Decision::Deny(_) => &self.config.lock_indicator,
        };
        Ok(format!("{} {}", name, indicator))
    }

    /// Decide how the row selection checkbox renders.
    ///
    /// The host's default entity never gets a checkbox. Otherwise the box is
    /// shown only when the principal could delete the entity.
    pub fn selection_control(
        &self,
        ctx: &RequestContext,
        entity: EntityId,
        is_default: bool,
    ) -> Result<SelectionControl> {
        if is_default {
            return Ok(SelectionControl::Suppressed);
        }
        Ok(
            if self.decide(ctx, GuardAction::Delete, entity)?.is_allowed() {
                SelectionControl::Checkbox
            } else {
                SelectionControl::Suppressed
            },
        )
    }

    /// Remove the bulk delete action from guarded list tables.
    pub fn filter_bulk_actions(&self, ctx: &RequestContext, actions: Vec<String>) -> Vec<String> {
        if !ctx.guarded || !self.config.strip_bulk_delete {
            return actions;
        }
        actions.into_iter().filter(|a| a != BULK_DELETE).collect()
    }

    /// Submit the lock field for `entity` on behalf of the request's
    /// principal, overwriting any previous lock.
    ///
    /// The update guard runs first, so a principal who cannot edit the
    /// entity cannot replace its lock either. No compare-and-set is done:
    /// two principals submitting at once both succeed and the later write
    /// wins.
    pub fn submit_lock(&self, ctx: &RequestContext, entity: EntityId) -> Result<LockSubmission> {
        if let GuardOutcome::Refused(refusal) = self.before_update(ctx, entity)? {
            return Ok(LockSubmission::Refused(refusal));
        }

        let value = self.locks.create_lock(&ctx.principal);
        if value.is_empty() {
            return Ok(LockSubmission::NotCreated);
        }

        self.locks.store_lock(entity, &value)?;
        Ok(match LockRecord::parse(&value) {
            Some(record) => LockSubmission::Created(record),
            None => LockSubmission::NotCreated,
        })
    }

    /// Clear the lock of `entity` by storing an empty value.
    pub fn clear_lock(&self, ctx: &RequestContext, entity: EntityId) -> Result<GuardOutcome> {
        let outcome = self.before_update(ctx, entity)?;
        if outcome.is_allowed() {
            self.locks.store_lock(entity, "")?;
        }
        Ok(outcome)
    }
}
