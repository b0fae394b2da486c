use crate::{Control, EntryId, EntryStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueViewModel {
    pub entries: Vec<EntryView>,
    pub in_flight: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub entry_id: EntryId,
    pub identifier: String,
    pub status: EntryStatus,
    /// `entry` followed by the status class, if any.
    pub classes: Vec<&'static str>,
    pub message: Option<MessageView>,
    pub links: Vec<EntryLink>,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Success,
    Error,
}

impl MessageStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageStyle::Success => "success-msg",
            MessageStyle::Error => "error-msg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub text: String,
    pub style: MessageStyle,
    pub visible: bool,
}

/// Navigational link inserted into an entry after a successful ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLink {
    pub label: String,
    pub href: String,
}

impl EntryLink {
    pub const CLASS: &'static str = "link";

    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}
