use std::collections::HashMap;

use queue_client::{ApiError, ApiRequest, ApiResponse, ClientEvent, ClientHandle, HttpMethod};
use queue_core::{
    Action, ActionRequest, Effect, EntryId, Msg, RequestFailed, RequestId, ServerReply,
};
use queue_logging::{queue_info, queue_warn};

/// Executes core effects through the client and maps its events back into messages.
pub struct EffectRunner {
    client: ClientHandle,
    requests: HashMap<RequestId, EntryId>,
    timers: HashMap<u64, (EntryId, u64)>,
    next_timer_id: u64,
}

impl EffectRunner {
    pub fn new(client: ClientHandle) -> Self {
        Self {
            client,
            requests: HashMap::new(),
            timers: HashMap::new(),
            next_timer_id: 1,
        }
    }

    /// Runs effects; returns console notices for links that were followed.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<String> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::SendRequest(request) => {
                    queue_info!(
                        "{} entry={} request_id={} url={}",
                        request.action,
                        request.entry_id,
                        request.request_id,
                        request.url
                    );
                    self.requests.insert(request.request_id, request.entry_id);
                    self.client.submit(to_api_request(request));
                }
                Effect::ScheduleMessageHide {
                    entry_id,
                    generation,
                    after,
                } => {
                    let timer_id = self.next_timer_id;
                    self.next_timer_id += 1;
                    self.timers.insert(timer_id, (entry_id, generation));
                    self.client.schedule(timer_id, after);
                }
                Effect::FollowLink { href } => {
                    queue_info!("FollowLink href={}", href);
                    notices.push(format!("open {href}"));
                }
            }
        }
        notices
    }

    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    /// Drains client events that have arrived so far.
    pub fn drain(&mut self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.client.try_recv() {
            if let Some(msg) = self.map_event(event) {
                msgs.push(msg);
            }
        }
        msgs
    }

    fn map_event(&mut self, event: ClientEvent) -> Option<Msg> {
        match event {
            ClientEvent::RequestCompleted { request_id, result } => {
                let Some(entry_id) = self.requests.remove(&request_id) else {
                    queue_warn!("Completion for unknown request_id={}", request_id);
                    return None;
                };
                Some(Msg::RequestCompleted {
                    request_id,
                    entry_id,
                    outcome: to_outcome(result),
                })
            }
            ClientEvent::TimerElapsed { timer_id } => {
                let (entry_id, generation) = self.timers.remove(&timer_id)?;
                Some(Msg::MessageHideElapsed {
                    entry_id,
                    generation,
                })
            }
        }
    }
}

pub(crate) fn to_api_request(request: ActionRequest) -> ApiRequest {
    ApiRequest {
        request_id: request.request_id,
        method: match request.action {
            Action::Ingest => HttpMethod::Post,
            Action::Ignore => HttpMethod::Delete,
        },
        url: request.url,
        form: request.form,
        csrf_token: request.csrf_token,
    }
}

/// Every failure kind surfaces the same way: its body text.
pub(crate) fn to_outcome(
    result: Result<ApiResponse, ApiError>,
) -> Result<ServerReply, RequestFailed> {
    match result {
        Ok(response) => Ok(ServerReply {
            body: response.body,
            location: response.location,
        }),
        Err(err) => {
            queue_warn!("Request failed: {}", err);
            Err(RequestFailed { body: err.body })
        }
    }
}
