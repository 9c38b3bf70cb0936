//! `lock`, `unlock` and `show` commands.

use super::session::Session;
use crate::cli::{EntityArgs, GlobalArgs};
use crate::error::Result;
use crate::events::EventAction;
use crate::guard::LockSubmission;
use crate::locks::LockRecord;
use crate::store::EntityId;
use serde_json::json;

pub fn cmd_lock(globals: &GlobalArgs, args: EntityArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let entity = EntityId(args.entity);

    match run_lock(&session, entity)? {
        Some(record) => {
            println!("Locked entity {} for principal {}", entity, record.owner);
            println!("  Value:      {}", record);
        }
        None => {
            println!("No lock created: the acting principal has no identity.");
            println!("Pass --as <PRINCIPAL_ID> or set TERMLOCK_PRINCIPAL.");
        }
    }
    Ok(())
}

/// Submit the lock for `entity`. `None` means nothing was persisted.
pub(crate) fn run_lock(session: &Session, entity: EntityId) -> Result<Option<LockRecord>> {
    match session.guards.submit_lock(&session.request, entity)? {
        LockSubmission::Created(record) => {
            session.record(
                EventAction::LockCreate,
                entity,
                json!({ "lock": record.serialize() }),
            );
            Ok(Some(record))
        }
        LockSubmission::NotCreated => Ok(None),
        LockSubmission::Refused(refusal) => Err(session.refuse(Some(entity), refusal)),
    }
}

pub fn cmd_unlock(globals: &GlobalArgs, args: EntityArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let entity = EntityId(args.entity);

    if run_unlock(&session, entity)? {
        println!("Cleared lock on entity {}", entity);
    } else {
        println!("Entity {} is not locked.", entity);
    }
    Ok(())
}

/// Clear the lock of `entity`. Returns whether a lock was present.
pub(crate) fn run_unlock(session: &Session, entity: EntityId) -> Result<bool> {
    let previous = session.guards.locks().get_lock(entity)?;
    let outcome = session.guards.clear_lock(&session.request, entity)?;
    session.enforce(Some(entity), outcome)?;

    if let Some(previous) = &previous {
        session.record(EventAction::LockClear, entity, json!({ "previous": previous }));
    }
    Ok(previous.is_some())
}

pub fn cmd_show(globals: &GlobalArgs, args: EntityArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let entity = EntityId(args.entity);

    let Some(raw) = session.guards.locks().get_lock(entity)? else {
        println!("Entity {} is not locked.", entity);
        return Ok(());
    };

    println!("Entity {}:", entity);
    println!("  Value:      {}", raw);
    if let Some(record) = LockRecord::parse(&raw) {
        if record.owner.is_resolved() {
            println!("  Owner:      {}", record.owner);
        } else {
            println!("  Owner:      none (malformed lock, only override holders may act)");
        }
        if let Some(created) = record.created_at_utc() {
            println!("  Created:    {}", created.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        println!("  Age:        {}", record.age_string());
    }
    Ok(())
}
