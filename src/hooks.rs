//! Lifecycle events raised by the host and routed to the guards.
//!
//! The host registers one callback per lifecycle event; each callback builds
//! a [`HookEvent`] and hands it to [`GuardDispatcher::handle`]. The outcome is
//! either the untouched input or a transformed/refusing result.

use crate::error::Result;
use crate::guard::{
    GuardDispatcher, GuardOutcome, Refusal, RequestContext, RowActions, SelectionControl,
};
use crate::principal::CapabilityChecker;
use crate::store::{EntityId, MetaStore};

/// A lifecycle event of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    BeforeUpdate { entity: EntityId },
    BeforeDelete { entity: EntityId },
    ScreenLoad { target: Option<EntityId> },
    RowActions { entity: EntityId, actions: RowActions },
    DisplayName { entity: EntityId, name: String },
    SelectionControl { entity: EntityId, is_default: bool },
    BulkActions { actions: Vec<String> },
}

impl HookEvent {
    /// Stable event name, as registered with the host.
    pub fn name(&self) -> &'static str {
        match self {
            HookEvent::BeforeUpdate { .. } => "before_update",
            HookEvent::BeforeDelete { .. } => "before_delete",
            HookEvent::ScreenLoad { .. } => "screen_load",
            HookEvent::RowActions { .. } => "row_actions",
            HookEvent::DisplayName { .. } => "display_name",
            HookEvent::SelectionControl { .. } => "selection_control",
            HookEvent::BulkActions { .. } => "bulk_actions",
        }
    }
}

/// Names of every event the guards listen to.
pub const LIFECYCLE_EVENTS: &[&str] = &[
    "before_update",
    "before_delete",
    "screen_load",
    "row_actions",
    "display_name",
    "selection_control",
    "bulk_actions",
];

/// What the host should do after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Continue the operation unchanged.
    Proceed,
    /// Abort the request with this refusal.
    Refuse(Refusal),
    RowActions(RowActions),
    DisplayName(String),
    SelectionControl(SelectionControl),
    BulkActions(Vec<String>),
}

impl From<GuardOutcome> for HookOutcome {
    fn from(outcome: GuardOutcome) -> Self {
        match outcome {
            GuardOutcome::Allowed(_) => HookOutcome::Proceed,
            GuardOutcome::Refused(refusal) => HookOutcome::Refuse(refusal),
        }
    }
}

impl<S: MetaStore, C: CapabilityChecker> GuardDispatcher<S, C> {
    /// Route a lifecycle event to its guard.
    pub fn handle(&self, ctx: &RequestContext, event: HookEvent) -> Result<HookOutcome> {
        Ok(match event {
            HookEvent::BeforeUpdate { entity } => self.before_update(ctx, entity)?.into(),
            HookEvent::BeforeDelete { entity } => self.before_delete(ctx, entity)?.into(),
            HookEvent::ScreenLoad { target } => self.screen_access(ctx, target)?.into(),
            HookEvent::RowActions { entity, actions } => {
                HookOutcome::RowActions(self.row_actions(ctx, entity, actions)?)
            }
            HookEvent::DisplayName { entity, name } => {
                HookOutcome::DisplayName(self.annotate_name(ctx, entity, &name)?)
            }
            HookEvent::SelectionControl { entity, is_default } => {
                HookOutcome::SelectionControl(self.selection_control(ctx, entity, is_default)?)
            }
            HookEvent::BulkActions { actions } => {
                HookOutcome::BulkActions(self.filter_bulk_actions(ctx, actions))
            }
        })
    }
}

/// A metadata field whose saves are gated by a guard.
///
/// The host's field framework calls these instead of subclassing: it asks
/// for the key, the value the form should carry, and whether a save may go
/// ahead.
pub trait GuardedField {
    /// Key the field is stored under.
    fn meta_key(&self) -> &str;

    /// Value to pre-fill into an add/edit form for this request.
    fn form_value(&self, ctx: &RequestContext) -> String;

    /// Guard run before the field is persisted for `entity`.
    fn on_before_save(&self, ctx: &RequestContext, entity: EntityId) -> Result<GuardOutcome>;
}

impl<S: MetaStore, C: CapabilityChecker> GuardedField for GuardDispatcher<S, C> {
    fn meta_key(&self) -> &str {
        self.locks().meta_key()
    }

    fn form_value(&self, ctx: &RequestContext) -> String {
        self.locks().create_lock(&ctx.principal)
    }

    fn on_before_save(&self, ctx: &RequestContext, entity: EntityId) -> Result<GuardOutcome> {
        self.before_update(ctx, entity)
    }
}
