//! `update`, `delete` and `screen` commands: guards that refuse the whole request.

use super::session::Session;
use crate::cli::{EntityArgs, GlobalArgs, ScreenArgs, UpdateArgs};
use crate::error::{Result, TermLockError};
use crate::events::EventAction;
use crate::store::{EntityId, MetaStore};
use serde_json::json;

pub fn cmd_update(globals: &GlobalArgs, args: UpdateArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let entity = EntityId(args.entity);

    run_update(&session, entity, &args.field, &args.value)?;
    println!("Updated {} on entity {}", args.field, entity);
    Ok(())
}

pub(crate) fn run_update(session: &Session, entity: EntityId, field: &str, value: &str) -> Result<()> {
    if field == session.guards.locks().meta_key() {
        return Err(TermLockError::UserError(format!(
            "'{}' holds the lock; use `termlock lock` or `termlock unlock` instead",
            field
        )));
    }

    let outcome = session.guards.before_update(&session.request, entity)?;
    session.enforce(Some(entity), outcome)?;

    session.guards.locks().store().set_meta(entity, field, value)?;
    session.record(EventAction::Update, entity, json!({ "field": field }));
    Ok(())
}

pub fn cmd_delete(globals: &GlobalArgs, args: EntityArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let entity = EntityId(args.entity);

    run_delete(&session, entity)?;
    println!("Deleted entity {}", entity);
    Ok(())
}

/// Delete `entity`; its lock disappears with the rest of its metadata.
pub(crate) fn run_delete(session: &Session, entity: EntityId) -> Result<()> {
    let outcome = session.guards.before_delete(&session.request, entity)?;
    session.enforce(Some(entity), outcome)?;

    session.guards.locks().store().purge_entity(entity)?;
    session.record(EventAction::Delete, entity, json!({}));
    Ok(())
}

pub fn cmd_screen(globals: &GlobalArgs, args: ScreenArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let target = args.entity.map(EntityId);

    run_screen(&session, target)?;
    match target {
        Some(entity) => println!("Access granted to the edit screen of entity {}", entity),
        None => println!("Access granted to the list screen"),
    }
    Ok(())
}

pub(crate) fn run_screen(session: &Session, target: Option<EntityId>) -> Result<()> {
    let outcome = session.guards.screen_access(&session.request, target)?;
    session.enforce(target, outcome)
}
