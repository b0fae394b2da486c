use crate::{Control, EntryId, RequestId};

/// Successful server response for an entry action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerReply {
    pub body: String,
    /// `Location` response header, if any.
    pub location: Option<String>,
}

/// Any non-success response or transport failure, with its body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailed {
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User clicked a control inside an entry.
    ControlClicked { entry_id: EntryId, control: Control },
    /// The request issued for an entry resolved.
    RequestCompleted {
        request_id: RequestId,
        entry_id: EntryId,
        outcome: Result<ServerReply, RequestFailed>,
    },
    /// The hide delay for an entry's message elapsed.
    MessageHideElapsed { entry_id: EntryId, generation: u64 },
    /// Periodic wake-up from the shell; changes nothing.
    Tick,
}
