//! Error types for termlock.
//!
//! Uses thiserror for derive macros. Authorization decisions are never errors;
//! only a refusal that has to end the current request is lifted into
//! [`TermLockError::Refused`] so callers can turn it into a terminal response.

use crate::exit_codes;
use crate::guard::Refusal;
use thiserror::Error;

/// Main error type for termlock operations.
#[derive(Error, Debug)]
pub enum TermLockError {
    /// User provided invalid arguments or the state directory is unusable.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be parsed or failed validation.
    #[error("config validation failed: {0}")]
    ConfigError(String),

    /// The metadata store could not be read or written.
    #[error("metadata store error: {0}")]
    StoreError(String),

    /// A guard refused the operation.
    #[error("{}", .0.heading)]
    Refused(Refusal),
}

impl TermLockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TermLockError::UserError(_) | TermLockError::ConfigError(_) => exit_codes::USER_ERROR,
            TermLockError::StoreError(_) => exit_codes::STORE_FAILURE,
            TermLockError::Refused(_) => exit_codes::REFUSED,
        }
    }
}

/// Result type alias for termlock operations.
pub type Result<T> = std::result::Result<T, TermLockError>;
