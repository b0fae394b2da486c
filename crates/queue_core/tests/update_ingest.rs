use std::sync::Once;
use std::time::Duration;

use queue_core::{
    update, Action, ActionRequest, Effect, EntryLink, EntrySnapshot, EntryStatus, MessageStyle,
    Msg, QueueConfig, QueueState, RequestFailed, ServerReply,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(queue_logging::initialize_for_tests);
}

fn queue() -> QueueState {
    QueueState::new(
        QueueConfig::new("tok-123"),
        vec![
            EntrySnapshot::with_actions("PMC42", "/publications/new/", "/harvest/records/1/"),
            EntrySnapshot::with_actions("PMC43", "/publications/new/", "/harvest/records/2/"),
        ],
    )
}

fn click(state: QueueState, entry_id: u64, class: &str) -> (QueueState, Vec<Effect>) {
    let control = state.control(entry_id, class).expect("control").clone();
    update(state, Msg::ControlClicked { entry_id, control })
}

fn sent_request(effects: &[Effect]) -> ActionRequest {
    match effects {
        [Effect::SendRequest(request)] => request.clone(),
        other => panic!("expected a single request, got {other:?}"),
    }
}

fn complete(
    state: QueueState,
    request: &ActionRequest,
    outcome: Result<ServerReply, RequestFailed>,
) -> (QueueState, Vec<Effect>) {
    update(
        state,
        Msg::RequestCompleted {
            request_id: request.request_id,
            entry_id: request.entry_id,
            outcome,
        },
    )
}

#[test]
fn ingest_click_marks_working_before_response() {
    init_logging();
    let (mut state, effects) = click(queue(), 1, "ingest");

    assert_eq!(state.entry_status(1), Some(EntryStatus::Working));
    assert_eq!(state.entry_status(2), Some(EntryStatus::Idle));
    assert!(state.consume_dirty());
    assert_eq!(
        sent_request(&effects),
        ActionRequest {
            request_id: 1,
            entry_id: 1,
            action: Action::Ingest,
            url: "/publications/new/".to_string(),
            form: vec![("pmcid".to_string(), "PMC42".to_string())],
            csrf_token: "tok-123".to_string(),
        }
    );
    assert_eq!(sent_request(&effects).method(), "POST");
    assert_eq!(state.view().entries[0].classes, vec!["entry", "working"]);
}

#[test]
fn successful_ingest_shows_body_and_adds_links() {
    init_logging();
    let (state, effects) = click(queue(), 1, "ingest");
    let request = sent_request(&effects);

    let (state, effects) = complete(
        state,
        &request,
        Ok(ServerReply {
            body: "OK".to_string(),
            location: Some("/pub/42/".to_string()),
        }),
    );

    assert_eq!(state.entry_status(1), Some(EntryStatus::Ingested));
    let entry = &state.view().entries[0];
    assert_eq!(entry.classes, vec!["entry", "ingested"]);
    let message = entry.message.as_ref().expect("message");
    assert_eq!(message.text, "OK");
    assert_eq!(message.style, MessageStyle::Success);
    assert_eq!(message.style.css_class(), "success-msg");
    assert!(message.visible);
    assert_eq!(
        entry.links,
        vec![
            EntryLink::new("view", "/pub/42/"),
            EntryLink::new("review", "/pub/42/edit/"),
        ]
    );
    assert_eq!(
        effects,
        vec![Effect::ScheduleMessageHide {
            entry_id: 1,
            generation: 1,
            after: Duration::from_millis(1500),
        }]
    );
}

#[test]
fn empty_success_body_defaults_to_success_text() {
    init_logging();
    let (state, effects) = click(queue(), 1, "ingest");
    let request = sent_request(&effects);

    let (state, _) = complete(state, &request, Ok(ServerReply::default()));

    let entry = &state.view().entries[0];
    assert_eq!(entry.message.as_ref().unwrap().text, "Success");
    assert_eq!(entry.status, EntryStatus::Ingested);
    // No Location header, nothing to link to.
    assert!(entry.links.is_empty());
}

#[test]
fn failed_ingest_shows_persistent_error() {
    init_logging();
    let (state, effects) = click(queue(), 1, "ingest");
    let request = sent_request(&effects);

    let (state, effects) = complete(
        state,
        &request,
        Err(RequestFailed {
            body: "bad id".to_string(),
        }),
    );
    assert!(effects.is_empty(), "errors are never scheduled for hiding");

    // A late hide for the same generation must not touch an error message.
    let (state, _) = update(
        state,
        Msg::MessageHideElapsed {
            entry_id: 1,
            generation: 1,
        },
    );

    let entry = &state.view().entries[0];
    let message = entry.message.as_ref().expect("message");
    assert_eq!(message.text, "Error: bad id");
    assert_eq!(message.style, MessageStyle::Error);
    assert_eq!(message.style.css_class(), "error-msg");
    assert!(message.visible);
    assert!(entry.links.is_empty());
}

#[test]
fn links_from_repeated_ingest_are_prepended() {
    init_logging();
    let (state, effects) = click(queue(), 1, "ingest");
    let first = sent_request(&effects);
    let (state, _) = complete(
        state,
        &first,
        Ok(ServerReply {
            body: "Ingested as a:1".to_string(),
            location: Some("/pub/1/".to_string()),
        }),
    );

    let (state, effects) = click(state, 1, "ingest");
    let second = sent_request(&effects);
    assert_eq!(second.request_id, 2);
    let (state, _) = complete(
        state,
        &second,
        Ok(ServerReply {
            body: "Ingested as a:2".to_string(),
            location: Some("/pub/2/".to_string()),
        }),
    );

    let hrefs: Vec<_> = state.view().entries[0]
        .links
        .iter()
        .map(|link| link.href.clone())
        .collect();
    assert_eq!(hrefs, vec!["/pub/2/", "/pub/2/edit/", "/pub/1/", "/pub/1/edit/"]);
}
