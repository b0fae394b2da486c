//! Harvest queue core: pure state machine and view-model helpers.
mod config;
mod effect;
mod entry;
mod msg;
mod routing;
mod state;
mod update;
mod view_model;

pub use config::{FailurePolicy, QueueConfig, DEFAULT_IDENTIFIER_FIELD, SUCCESS_MESSAGE_TTL};
pub use effect::{ActionRequest, Effect};
pub use entry::{Action, Control, EntryId, EntrySnapshot, EntryStatus, RequestId};
pub use msg::{Msg, RequestFailed, ServerReply};
pub use routing::ClickRouter;
pub use state::QueueState;
pub use update::update;
pub use view_model::{EntryLink, EntryView, MessageStyle, MessageView, QueueViewModel};
