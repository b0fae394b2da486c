use std::collections::BTreeMap;

use crate::view_model::{EntryLink, EntryView, MessageStyle, MessageView, QueueViewModel};
use crate::{
    Action, ActionRequest, Control, Effect, EntryId, EntrySnapshot, EntryStatus, FailurePolicy,
    QueueConfig, RequestFailed, RequestId, ServerReply,
};

const DEFAULT_SUCCESS_TEXT: &str = "Success";
const REVIEW_SUFFIX: &str = "edit/";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueState {
    config: QueueConfig,
    entries: BTreeMap<EntryId, Entry>,
    next_request_id: RequestId,
    dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    identifier: String,
    controls: Vec<Control>,
    status: EntryStatus,
    in_flight: Option<InFlight>,
    message: Option<Message>,
    message_generation: u64,
    links: Vec<EntryLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    action: Action,
    prior: EntryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Message {
    text: String,
    style: MessageStyle,
    visible: bool,
    generation: u64,
}

impl QueueState {
    /// Attaches to an already rendered listing; ids follow listing order from 1.
    pub fn new(config: QueueConfig, listing: Vec<EntrySnapshot>) -> Self {
        let entries = listing
            .into_iter()
            .zip(1..)
            .map(|(snapshot, id)| (id, Entry::from_snapshot(snapshot)))
            .collect();
        Self {
            config,
            entries,
            next_request_id: 1,
            dirty: true,
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn entry_status(&self, entry_id: EntryId) -> Option<EntryStatus> {
        self.entries.get(&entry_id).map(|entry| entry.status)
    }

    /// First control on the entry carrying `class`, as the shell needs it to build a click.
    pub fn control(&self, entry_id: EntryId, class: &str) -> Option<&Control> {
        self.entries
            .get(&entry_id)?
            .controls
            .iter()
            .find(|control| control.has_class(class))
    }

    pub fn in_flight_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.in_flight.is_some())
            .count()
    }

    pub fn view(&self) -> QueueViewModel {
        QueueViewModel {
            entries: self
                .entries
                .iter()
                .map(|(id, entry)| entry.view(*id))
                .collect(),
            in_flight: self.in_flight_count(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Guarded start of an action. `None` when the entry is unknown or already working.
    pub(crate) fn begin_request(
        &mut self,
        entry_id: EntryId,
        action: Action,
        href: String,
    ) -> Option<ActionRequest> {
        let entry = self.entries.get_mut(&entry_id)?;
        if entry.status == EntryStatus::Working {
            return None;
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        entry.in_flight = Some(InFlight {
            request_id,
            action,
            prior: entry.status,
        });
        entry.status = EntryStatus::Working;
        self.dirty = true;

        let form = match action {
            Action::Ingest => vec![(
                self.config.identifier_field.clone(),
                entry.identifier.clone(),
            )],
            Action::Ignore => Vec::new(),
        };
        Some(ActionRequest {
            request_id,
            entry_id,
            action,
            url: href,
            form,
            csrf_token: self.config.csrf_token.clone(),
        })
    }

    /// Resolves the entry's in-flight request. Stale or repeated completions are dropped.
    pub(crate) fn complete_request(
        &mut self,
        request_id: RequestId,
        entry_id: EntryId,
        outcome: Result<ServerReply, RequestFailed>,
    ) -> Vec<Effect> {
        let Some(entry) = self.entries.get_mut(&entry_id) else {
            return Vec::new();
        };
        let Some(ticket) = entry.in_flight.filter(|t| t.request_id == request_id) else {
            return Vec::new();
        };
        entry.in_flight = None;
        self.dirty = true;

        match outcome {
            Ok(reply) => {
                let text = if reply.body.is_empty() {
                    DEFAULT_SUCCESS_TEXT.to_string()
                } else {
                    reply.body
                };
                let generation = entry.show_message(text, MessageStyle::Success);
                entry.status = ticket.action.completed_status();
                if ticket.action == Action::Ingest {
                    if let Some(location) = reply.location {
                        entry.prepend_resource_links(&location);
                    }
                }
                vec![Effect::ScheduleMessageHide {
                    entry_id,
                    generation,
                    after: self.config.success_message_ttl,
                }]
            }
            Err(failure) => {
                entry.show_message(format!("Error: {}", failure.body), MessageStyle::Error);
                entry.status = match self.config.failure_policy {
                    FailurePolicy::Retain => EntryStatus::Working,
                    FailurePolicy::Restore => ticket.prior,
                };
                Vec::new()
            }
        }
    }

    pub(crate) fn hide_message(&mut self, entry_id: EntryId, generation: u64) {
        let Some(message) = self
            .entries
            .get_mut(&entry_id)
            .and_then(|entry| entry.message.as_mut())
        else {
            return;
        };
        if message.generation == generation
            && message.style == MessageStyle::Success
            && message.visible
        {
            message.visible = false;
            self.dirty = true;
        }
    }
}

impl Entry {
    fn from_snapshot(snapshot: EntrySnapshot) -> Self {
        Self {
            identifier: snapshot.identifier,
            controls: snapshot.controls,
            status: EntryStatus::Idle,
            in_flight: None,
            message: None,
            message_generation: 0,
            links: Vec::new(),
        }
    }

    fn show_message(&mut self, text: String, style: MessageStyle) -> u64 {
        self.message_generation += 1;
        self.message = Some(Message {
            text,
            style,
            visible: true,
            generation: self.message_generation,
        });
        self.message_generation
    }

    fn prepend_resource_links(&mut self, location: &str) {
        let view = EntryLink::new("view", location);
        let review = EntryLink::new("review", format!("{location}{REVIEW_SUFFIX}"));
        self.links.insert(0, review);
        self.links.insert(0, view);
    }

    fn view(&self, entry_id: EntryId) -> EntryView {
        let mut classes = vec!["entry"];
        classes.extend(self.status.css_class());
        EntryView {
            entry_id,
            identifier: self.identifier.clone(),
            status: self.status,
            classes,
            message: self.message.as_ref().map(|message| MessageView {
                text: message.text.clone(),
                style: message.style,
                visible: message.visible,
            }),
            links: self.links.clone(),
            controls: self.controls.clone(),
        }
    }
}
