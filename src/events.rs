//! Append-only audit log for termlock.
//!
//! Guarded mutations and refusals are recorded in NDJSON format (one JSON
//! object per line) in `events.ndjson` inside the state directory.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (lock_create, update, delete, refuse, ...)
//! - `actor`: `principal:<id>@<host>`
//! - `entity`: optional entity id
//! - `details`: freeform object with action-specific details
//!
//! ```no_run
//! use termlock::context::StateContext;
//! use termlock::events::{append_event, Event, EventAction};
//! use termlock::principal::Principal;
//! use termlock::store::EntityId;
//! use serde_json::json;
//!
//! let ctx = StateContext::resolve()?;
//! let event = Event::new(EventAction::LockCreate, &Principal::new(42))
//!     .with_entity(EntityId(12))
//!     .with_details(json!({"lock": "1700000000:42"}));
//! append_event(&ctx, &event)?;
//! # Ok::<(), termlock::error::TermLockError>(())
//! ```

use crate::context::StateContext;
use crate::error::{Result, TermLockError};
use crate::principal::Principal;
use crate::store::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// State directory initialized
    Init,
    /// Lock written for an entity
    LockCreate,
    /// Lock cleared by storing an empty value
    LockClear,
    /// Entity field updated
    Update,
    /// Entity deleted
    Delete,
    /// A guard refused an operation
    Refuse,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Init => write!(f, "init"),
            EventAction::LockCreate => write!(f, "lock_create"),
            EventAction::LockClear => write!(f, "lock_clear"),
            EventAction::Update => write!(f, "update"),
            EventAction::Delete => write!(f, "delete"),
            EventAction::Refuse => write!(f, "refuse"),
        }
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityId>,
    pub details: Value,
}

impl Event {
    /// Create an event stamped with the current time, acted by `principal`.
    pub fn new(action: EventAction, principal: &Principal) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(principal),
            entity: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            TermLockError::StoreError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

fn actor_string(principal: &Principal) -> String {
    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("principal:{}@{}", principal.id, host)
}

/// Append an event to the audit log, creating it if needed.
pub fn append_event(ctx: &StateContext, event: &Event) -> Result<()> {
    let events_file = ctx.events_path();
    let json_line = event.to_ndjson_line()?;

    if !ctx.state_dir.exists() {
        fs::create_dir_all(&ctx.state_dir).map_err(|e| {
            TermLockError::StoreError(format!(
                "failed to create state directory '{}': {}",
                ctx.state_dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            TermLockError::StoreError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        TermLockError::StoreError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        TermLockError::StoreError(format!(
            "failed to sync events file '{}': {}",
            events_file.display(),
            e
        ))
    })
}

/// Append an event, printing a warning instead of failing.
pub fn log_event(ctx: &StateContext, event: &Event) {
    if let Err(e) = append_event(ctx, event) {
        eprintln!("Warning: failed to log {} event: {}", event.action, e);
    }
}

/// Read every event from the audit log. A missing log reads as empty.
pub fn read_events(ctx: &StateContext) -> Result<Vec<Event>> {
    let events_file = ctx.events_path();
    if !events_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&events_file).map_err(|e| {
        TermLockError::StoreError(format!(
            "failed to read events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                TermLockError::StoreError(format!("failed to parse event line: {}", e))
            })
        })
        .collect()
}
