//! Command implementations for termlock.
//!
//! Each command opens a [`session::Session`] against the state directory,
//! runs one guard, and prints the outcome. Refusals surface as
//! [`TermLockError::Refused`](crate::error::TermLockError::Refused).

mod init;
mod lock;
mod mutate;
mod render;
mod session;


use crate::cli::{Cli, Command};
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let globals = &cli.globals;
    match cli.command {
        Command::Init(args) => init::cmd_init(args),
        Command::Lock(args) => lock::cmd_lock(globals, args),
        Command::Unlock(args) => lock::cmd_unlock(globals, args),
        Command::Show(args) => lock::cmd_show(globals, args),
        Command::Update(args) => mutate::cmd_update(globals, args),
        Command::Delete(args) => mutate::cmd_delete(globals, args),
        Command::Screen(args) => mutate::cmd_screen(globals, args),
        Command::RowActions(args) => render::cmd_row_actions(globals, args),
        Command::Name(args) => render::cmd_name(globals, args),
        Command::Checkbox(args) => render::cmd_checkbox(globals, args),
        Command::List => render::cmd_list(globals),
    }
}
