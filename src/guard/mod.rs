//! Guard Dispatcher.
//!
//! Each guarded operation is a small two-state machine: unchecked, then
//! allowed or refused after reading the lock and consulting the
//! authorization engine.
//!
//! | Operation          | Capability slot | On refusal                        |
//! |--------------------|-----------------|-----------------------------------|
//! | update             | update          | whole request refused             |
//! | delete             | delete          | whole request refused             |
//! | screen access      | manage          | whole request refused             |
//! | row actions        | manage          | actions narrowed to the allow-list |
//! | name annotation    | manage          | never refused; indicator appended |
//! | selection checkbox | delete          | checkbox suppressed               |
//! | bulk actions       | none            | bulk delete removed               |
//!
//! No check has side effects on the lock or the entity, and repeating a
//! check with the same inputs yields the same result.

mod dispatcher;
mod refusal;
mod render;
mod request;


// Re-export public API
pub use dispatcher::{GuardDispatcher, LockSubmission};
pub use refusal::{FORBIDDEN, GuardOutcome, Refusal, RefusalBody, RequestMode};
pub use render::{RowAction, RowActions, SelectionControl};
pub use request::RequestContext;
