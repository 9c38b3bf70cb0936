//! Per-request state resolved once and threaded through every guard.

use super::refusal::RequestMode;
use crate::principal::Principal;

/// The acting principal and category of one request.
///
/// Built by [`GuardDispatcher::begin_request`](super::GuardDispatcher::begin_request);
/// nothing is read from ambient state afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub principal: Principal,
    pub category: String,
    pub mode: RequestMode,
    pub(super) guarded: bool,
}

impl RequestContext {
    /// Whether the guards apply to this request's category.
    pub fn is_guarded(&self) -> bool {
        self.guarded
    }
}
