//! Termlock CLI entry point.
//!
//! Parses arguments, dispatches to the command handler, and maps errors to
//! exit codes. Refusals print the rendered refusal instead of an error line.

use std::process::ExitCode;
use termlock::cli::Cli;
use termlock::error::TermLockError;
use termlock::{commands, exit_codes};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            match &err {
                TermLockError::Refused(refusal) => eprintln!("{}", refusal),
                _ => eprintln!("Error: {}", err),
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
