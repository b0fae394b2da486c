use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use queue_logging::queue_trace;

use crate::api::{ClientError, ClientSettings, QueueApi, ReqwestQueueApi};
use crate::{ApiError, ApiRequest, ApiResponse, RequestId};

enum ClientCommand {
    Submit(ApiRequest),
    Schedule { timer_id: u64, after: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    RequestCompleted {
        request_id: RequestId,
        result: Result<ApiResponse, ApiError>,
    },
    TimerElapsed {
        timer_id: u64,
    },
}

/// Runs requests and timers on a background runtime; completions come back as events.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let api = ReqwestQueueApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn QueueApi>) -> Result<Self, ClientError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, request: ApiRequest) {
        let _ = self.cmd_tx.send(ClientCommand::Submit(request));
    }

    pub fn schedule(&self, timer_id: u64, after: Duration) {
        let _ = self.cmd_tx.send(ClientCommand::Schedule { timer_id, after });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    api: &dyn QueueApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::Submit(request) => {
            let result = api.send(&request).await;
            queue_trace!(
                "request_id={} completed ok={}",
                request.request_id,
                result.is_ok()
            );
            let _ = event_tx.send(ClientEvent::RequestCompleted {
                request_id: request.request_id,
                result,
            });
        }
        ClientCommand::Schedule { timer_id, after } => {
            tokio::time::sleep(after).await;
            let _ = event_tx.send(ClientEvent::TimerElapsed { timer_id });
        }
    }
}
