//! State directory resolution for the termlock CLI.
//!
//! All CLI state lives in one directory, by default `.termlock/` under the
//! current working directory, overridable with `TERMLOCK_DIR`:
//!
//! - `config.yaml`: guard configuration
//! - `meta.json`: per-entity metadata, including locks
//! - `events.ndjson`: audit log

use crate::error::{Result, TermLockError};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the state directory.
pub const STATE_DIR_ENV: &str = "TERMLOCK_DIR";

/// Default state directory name relative to the working directory.
pub const DEFAULT_STATE_DIR: &str = ".termlock";

/// Resolved paths of the CLI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateContext {
    /// Absolute (or caller-supplied) path of the state directory.
    pub state_dir: PathBuf,
}

impl StateContext {
    /// Resolve the state directory from `TERMLOCK_DIR` or the working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            TermLockError::UserError(format!("failed to get current working directory: {}", e))
        })?;
        let override_dir = env::var_os(STATE_DIR_ENV).map(PathBuf::from);

        Ok(Self::resolve_with(override_dir, &cwd))
    }

    /// Resolve from an explicit override and working directory.
    ///
    /// A relative override is taken relative to `cwd`; an empty one is ignored.
    pub fn resolve_with(override_dir: Option<PathBuf>, cwd: &Path) -> Self {
        let state_dir = match override_dir {
            Some(dir) if !dir.as_os_str().is_empty() => {
                if dir.is_absolute() {
                    dir
                } else {
                    cwd.join(dir)
                }
            }
            _ => cwd.join(DEFAULT_STATE_DIR),
        };
        Self { state_dir }
    }

    /// Use `dir` as the state directory as-is.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: dir.into(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.state_dir.join("config.yaml")
    }

    pub fn meta_path(&self) -> PathBuf {
        self.state_dir.join("meta.json")
    }

    pub fn events_path(&self) -> PathBuf {
        self.state_dir.join("events.ndjson")
    }

    /// Whether `termlock init` has been run for this directory.
    pub fn is_initialized(&self) -> bool {
        self.config_path().is_file()
    }

    /// Fail with an actionable message unless the state is initialized.
    pub fn ensure_initialized(&self) -> Result<()> {
        if !self.is_initialized() {
            return Err(TermLockError::UserError(format!(
                "termlock is not initialized: '{}' not found.\n\nRun `termlock init` first.",
                self.config_path().display()
            )));
        }
        Ok(())
    }
}

/// Resolve the state context and require it to be initialized.
pub fn require_initialized() -> Result<StateContext> {
    let ctx = StateContext::resolve()?;
    ctx.ensure_initialized()?;
    Ok(ctx)
}
