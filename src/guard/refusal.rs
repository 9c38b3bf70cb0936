//! Structured refusals produced by guard checks.

use crate::authz::{AllowReason, DenyReason};
use crate::config::{GuardAction, GuardConfig};
use crate::error::{Result, TermLockError};

/// HTTP-equivalent status of a refusal.
pub const FORBIDDEN: u16 = 403;

/// How the current request expects a refusal to be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    /// A synchronous page request; refusals are full-page responses.
    #[default]
    Interactive,
    /// An asynchronous/background call; refusals are a short inline string.
    Background,
}

/// The explanation part of a refusal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefusalBody {
    /// Explanatory text for a full-page refusal.
    Page(String),
    /// Short error string for a background call.
    Inline(String),
}

/// The negative outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refusal {
    pub action: GuardAction,
    pub reason: DenyReason,
    pub heading: String,
    pub body: RefusalBody,
    pub status: u16,
}

impl Refusal {
    /// Build the refusal for `action` using the configured wording.
    pub(crate) fn build(
        config: &GuardConfig,
        action: GuardAction,
        reason: DenyReason,
        mode: RequestMode,
    ) -> Self {
        let message = config.message_for(action);
        let body = match mode {
            RequestMode::Interactive => RefusalBody::Page(message.body.clone()),
            RequestMode::Background => RefusalBody::Inline(config.background_message.clone()),
        };
        Self {
            action,
            reason,
            heading: message.heading.clone(),
            body,
            status: FORBIDDEN,
        }
    }

    /// The text shown to the user.
    pub fn message(&self) -> &str {
        match &self.body {
            RefusalBody::Page(text) | RefusalBody::Inline(text) => text,
        }
    }
}

impl std::fmt::Display for Refusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body {
            RefusalBody::Page(body) => write!(f, "{}\n\n{}", self.heading, body),
            RefusalBody::Inline(text) => f.write_str(text),
        }
    }
}

/// Result of a guard that can stop the whole request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allowed(AllowReason),
    Refused(Refusal),
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allowed(_))
    }

    /// Lift a refusal into [`TermLockError::Refused`].
    pub fn into_result(self) -> Result<AllowReason> {
        match self {
            GuardOutcome::Allowed(reason) => Ok(reason),
            GuardOutcome::Refused(refusal) => Err(TermLockError::Refused(refusal)),
        }
    }
}
