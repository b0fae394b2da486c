use std::fmt;

pub type EntryId = u64;
pub type RequestId = u64;

/// One clickable control inside a rendered entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub class: String,
    pub label: String,
    pub href: String,
}

impl Control {
    pub fn new(
        class: impl Into<String>,
        label: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self {
            class: class.into(),
            label: label.into(),
            href: href.into(),
        }
    }

    /// Classes on the control; `class` holds a whitespace-separated list.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class.split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|candidate| candidate == class)
    }
}

/// An entry as rendered by the server-side queue listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot {
    pub identifier: String,
    pub controls: Vec<Control>,
}

impl EntrySnapshot {
    /// Listing entry with the standard `ingest` and `ignore` controls.
    pub fn with_actions(
        identifier: impl Into<String>,
        ingest_href: impl Into<String>,
        ignore_href: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            controls: vec![
                Control::new("ingest", "ingest", ingest_href),
                Control::new("ignore", "ignore", ignore_href),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryStatus {
    #[default]
    Idle,
    Working,
    Ingested,
    Ignored,
}

impl EntryStatus {
    /// Presentation class carried by the entry; idle entries carry none.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            EntryStatus::Idle => None,
            EntryStatus::Working => Some("working"),
            EntryStatus::Ingested => Some("ingested"),
            EntryStatus::Ignored => Some("ignored"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Ingest,
    Ignore,
}

impl Action {
    pub fn method(self) -> &'static str {
        match self {
            Action::Ingest => "POST",
            Action::Ignore => "DELETE",
        }
    }

    pub(crate) fn completed_status(self) -> EntryStatus {
        match self {
            Action::Ingest => EntryStatus::Ingested,
            Action::Ignore => EntryStatus::Ignored,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Ingest => write!(f, "ingest"),
            Action::Ignore => write!(f, "ignore"),
        }
    }
}
