use std::time::Duration;

use crate::{Action, EntryId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendRequest(ActionRequest),
    ScheduleMessageHide {
        entry_id: EntryId,
        generation: u64,
        after: Duration,
    },
    /// Click was not routed to a handler; the link is followed as usual.
    FollowLink { href: String },
}

/// A single-flight request for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub request_id: RequestId,
    pub entry_id: EntryId,
    pub action: Action,
    pub url: String,
    /// Form fields; empty for actions without a body.
    pub form: Vec<(String, String)>,
    pub csrf_token: String,
}

impl ActionRequest {
    pub fn method(&self) -> &'static str {
        self.action.method()
    }
}
