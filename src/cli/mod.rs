//! CLI argument parsing for termlock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};

/// termlock: advisory edit locks for taxonomy terms.
///
/// A principal claims a lock on a term; updates, deletes and management
/// screens are then refused for everyone except the lock owner and
/// principals holding the override capability.
#[derive(Parser, Debug)]
#[command(name = "termlock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options describing the acting request.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Act as this principal id (defaults to $TERMLOCK_PRINCIPAL, else anonymous).
    #[arg(long = "as", value_name = "PRINCIPAL_ID", global = true)]
    pub principal: Option<u64>,

    /// Category (taxonomy slug) of the entities being acted on.
    #[arg(long, default_value = "category", global = true)]
    pub category: String,

    /// Treat the request as a background call (inline refusals).
    #[arg(long, global = true)]
    pub background: bool,
}

/// Available commands for termlock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the state directory with a default config.
    Init(InitArgs),

    /// Lock an entity for the acting principal.
    ///
    /// Overwrites an existing lock if the principal may update the entity.
    Lock(EntityArgs),

    /// Clear the lock of an entity by storing an empty value.
    Unlock(EntityArgs),

    /// Show the lock of an entity.
    Show(EntityArgs),

    /// Update a metadata field of an entity.
    Update(UpdateArgs),

    /// Delete an entity and all of its metadata.
    Delete(EntityArgs),

    /// Check access to the management screen.
    ///
    /// Without an entity id this is the list screen and always passes.
    Screen(ScreenArgs),

    /// Print the row actions the acting principal gets for an entity.
    RowActions(RowActionsArgs),

    /// Print the display name of an entity with its lock indicator.
    Name(NameArgs),

    /// Print how the selection checkbox of an entity renders.
    Checkbox(CheckboxArgs),

    /// List locked entities.
    List,
}

/// Arguments for the `init` command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config.
    #[arg(long)]
    pub force: bool,
}

/// A single entity id argument.
#[derive(Args, Debug)]
pub struct EntityArgs {
    /// Entity (term) id.
    pub entity: u64,
}

/// Arguments for the `update` command.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Entity (term) id.
    pub entity: u64,

    /// Metadata field to set.
    pub field: String,

    /// New value.
    pub value: String,
}

/// Arguments for the `screen` command.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Target entity id, if the screen edits a single entity.
    pub entity: Option<u64>,
}

/// Arguments for the `row-actions` command.
#[derive(Args, Debug)]
pub struct RowActionsArgs {
    /// Entity (term) id.
    pub entity: u64,

    /// Action keys to filter (default: edit,quickedit,delete,view).
    #[arg(long, value_delimiter = ',')]
    pub actions: Vec<String>,
}

/// Arguments for the `name` command.
#[derive(Args, Debug)]
pub struct NameArgs {
    /// Entity (term) id.
    pub entity: u64,

    /// Display name to annotate.
    pub name: String,
}

/// Arguments for the `checkbox` command.
#[derive(Args, Debug)]
pub struct CheckboxArgs {
    /// Entity (term) id.
    pub entity: u64,

    /// The entity is the category's default entity.
    #[arg(long)]
    pub default: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_lock_with_principal() {
        let cli = Cli::try_parse_from(["termlock", "--as", "42", "lock", "12"]).unwrap();
        assert_eq!(cli.globals.principal, Some(42));
        assert_eq!(cli.globals.category, "category");
        assert!(!cli.globals.background);
        let Command::Lock(args) = cli.command else {
            panic!("Expected Lock command");
        };
        assert_eq!(args.entity, 12);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "termlock",
            "delete",
            "12",
            "--as",
            "7",
            "--category",
            "post_tag",
            "--background",
        ])
        .unwrap();
        assert_eq!(cli.globals.principal, Some(7));
        assert_eq!(cli.globals.category, "post_tag");
        assert!(cli.globals.background);
        assert!(matches!(cli.command, Command::Delete(EntityArgs { entity: 12 })));
    }

    #[test]
    fn parse_update() {
        let cli = Cli::try_parse_from(["termlock", "update", "3", "color", "red"]).unwrap();
        let Command::Update(args) = cli.command else {
            panic!("Expected Update command");
        };
        assert_eq!(args.entity, 3);
        assert_eq!(args.field, "color");
        assert_eq!(args.value, "red");
    }

    #[test]
    fn parse_screen_without_target() {
        let cli = Cli::try_parse_from(["termlock", "screen"]).unwrap();
        assert!(matches!(cli.command, Command::Screen(ScreenArgs { entity: None })));
    }

    #[test]
    fn parse_row_actions_list() {
        let cli =
            Cli::try_parse_from(["termlock", "row-actions", "5", "--actions", "edit,view"]).unwrap();
        let Command::RowActions(args) = cli.command else {
            panic!("Expected RowActions command");
        };
        assert_eq!(args.actions, vec!["edit", "view"]);
    }

    #[test]
    fn parse_checkbox_default() {
        let cli = Cli::try_parse_from(["termlock", "checkbox", "1", "--default"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Checkbox(CheckboxArgs {
                entity: 1,
                default: true
            })
        ));
    }

    #[test]
    fn entity_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["termlock", "lock", "news"]).is_err());
    }
}
