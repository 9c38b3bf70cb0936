//! `row-actions`, `name`, `checkbox` and `list` commands: guards that narrow
//! what is shown instead of refusing.

use super::session::Session;
use crate::cli::{CheckboxArgs, GlobalArgs, NameArgs, RowActionsArgs};
use crate::config::GuardAction;
use crate::error::Result;
use crate::guard::{RowActions, SelectionControl};
use crate::locks::LockRecord;
use crate::store::{EntityId, MetaStore};

pub fn cmd_row_actions(globals: &GlobalArgs, args: RowActionsArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let actions = if args.actions.is_empty() {
        RowActions::standard()
    } else {
        RowActions::from_keys(args.actions)
    };

    let actions = session
        .guards
        .row_actions(&session.request, EntityId(args.entity), actions)?;
    println!("{}", actions.keys().join(","));
    Ok(())
}

pub fn cmd_name(globals: &GlobalArgs, args: NameArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let name = session
        .guards
        .annotate_name(&session.request, EntityId(args.entity), &args.name)?;
    println!("{}", name);
    Ok(())
}

pub fn cmd_checkbox(globals: &GlobalArgs, args: CheckboxArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let control =
        session
            .guards
            .selection_control(&session.request, EntityId(args.entity), args.default)?;
    println!(
        "{}",
        match control {
            SelectionControl::Checkbox => "checkbox",
            SelectionControl::Suppressed => "suppressed",
        }
    );
    Ok(())
}

/// One row of `termlock list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LockedRow {
    pub entity: EntityId,
    pub record: LockRecord,
    pub can_manage: bool,
}

pub fn cmd_list(globals: &GlobalArgs) -> Result<()> {
    let session = Session::open(globals)?;
    let rows = run_list(&session)?;

    if rows.is_empty() {
        println!("No locked entities.");
        return Ok(());
    }

    println!("Locked entities ({}):", rows.len());
    println!();
    for row in &rows {
        let owner = if row.record.owner.is_resolved() {
            row.record.owner.to_string()
        } else {
            "none".to_string()
        };
        println!("  {}:", row.entity);
        println!("    Owner:      {}", owner);
        println!("    Age:        {}", row.record.age_string());
        println!(
            "    Access:     {}",
            if row.can_manage { "yes" } else { "locked" }
        );
    }
    Ok(())
}

pub(crate) fn run_list(session: &Session) -> Result<Vec<LockedRow>> {
    let mut rows = Vec::new();
    for entity in session.guards.locks().store().entity_ids()? {
        let Some(record) = session.guards.locks().read_record(entity)? else {
            continue;
        };
        let can_manage = session
            .guards
            .decide(&session.request, GuardAction::Manage, entity)?
            .is_allowed();
        rows.push(LockedRow {
            entity,
            record,
            can_manage,
        });
    }
    Ok(rows)
}
