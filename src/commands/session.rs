//! Per-invocation state shared by the guarded commands.

use crate::cli::GlobalArgs;
use crate::config::GuardConfig;
use crate::context::{StateContext, require_initialized};
use crate::error::{Result, TermLockError};
use crate::events::{Event, EventAction, log_event};
use crate::guard::{GuardDispatcher, GuardOutcome, Refusal, RequestContext, RequestMode};
use crate::principal::{EnvPrincipal, GrantTable};
use crate::store::{EntityId, FileMetaStore};
use serde_json::json;

/// One CLI invocation: the state directory, the guards over its store, and
/// the request context resolved once from the global arguments.
pub(crate) struct Session {
    pub state: StateContext,
    pub guards: GuardDispatcher<FileMetaStore, GrantTable>,
    pub request: RequestContext,
}

impl Session {
    pub(crate) fn open(globals: &GlobalArgs) -> Result<Self> {
        let state = require_initialized()?;
        Self::open_in(state, globals)
    }

    pub(crate) fn open_in(state: StateContext, globals: &GlobalArgs) -> Result<Self> {
        let config = GuardConfig::load(state.config_path())?;
        let grants = config.grant_table();
        let guards = GuardDispatcher::new(FileMetaStore::new(state.meta_path()), grants, config)?;

        let mode = if globals.background {
            RequestMode::Background
        } else {
            RequestMode::Interactive
        };
        let request = guards.begin_request(
            &EnvPrincipal::new(globals.principal),
            &globals.category,
            mode,
        );

        Ok(Self {
            state,
            guards,
            request,
        })
    }

    /// Turn a guard outcome into a command result, logging refusals.
    pub(crate) fn enforce(&self, entity: Option<EntityId>, outcome: GuardOutcome) -> Result<()> {
        match outcome {
            GuardOutcome::Allowed(_) => Ok(()),
            GuardOutcome::Refused(refusal) => Err(self.refuse(entity, refusal)),
        }
    }

    /// Log a refusal and convert it into a terminal error.
    pub(crate) fn refuse(&self, entity: Option<EntityId>, refusal: Refusal) -> TermLockError {
        let mut event = Event::new(EventAction::Refuse, &self.request.principal).with_details(
            json!({
                "action": refusal.action.as_str(),
                "reason": crate::authz::Decision::Deny(refusal.reason).label(),
                "category": self.request.category,
            }),
        );
        if let Some(entity) = entity {
            event = event.with_entity(entity);
        }
        log_event(&self.state, &event);

        TermLockError::Refused(refusal)
    }

    /// Log a successful mutation.
    pub(crate) fn record(&self, action: EventAction, entity: EntityId, details: serde_json::Value) {
        let event = Event::new(action, &self.request.principal)
            .with_entity(entity)
            .with_details(details);
        log_event(&self.state, &event);
    }
}
