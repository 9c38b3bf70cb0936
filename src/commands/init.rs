//! Implementation of the `termlock init` command.

use crate::cli::InitArgs;
use crate::config::GuardConfig;
use crate::context::StateContext;
use crate::error::{Result, TermLockError};
use crate::events::{Event, EventAction, log_event};
use crate::fs::atomic_write_file;
use crate::principal::Principal;
use serde_json::json;

/// Create the state directory and write the default config.
pub fn cmd_init(args: InitArgs) -> Result<()> {
    let ctx = StateContext::resolve()?;
    init_in(&ctx, args.force)?;

    println!("Initialized termlock state in {}", ctx.state_dir.display());
    println!();
    println!("  Config:   {}", ctx.config_path().display());
    println!("  Metadata: {}", ctx.meta_path().display());
    println!("  Events:   {}", ctx.events_path().display());
    Ok(())
}

pub(crate) fn init_in(ctx: &StateContext, force: bool) -> Result<()> {
    if ctx.is_initialized() && !force {
        return Err(TermLockError::UserError(format!(
            "termlock is already initialized at '{}'.\n\nUse `termlock init --force` to overwrite the config.",
            ctx.state_dir.display()
        )));
    }

    let config = GuardConfig::default();
    atomic_write_file(ctx.config_path(), &config.to_yaml()?)?;

    log_event(
        ctx,
        &Event::new(EventAction::Init, &Principal::anonymous()).with_details(json!({
            "meta_key": config.meta_key,
            "force": force,
        })),
    );
    Ok(())
}
