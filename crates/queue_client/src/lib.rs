//! Harvest queue client: HTTP calls and timers behind the core's effects.
mod api;
mod handle;
mod types;

pub use api::{ClientError, ClientSettings, QueueApi, ReqwestQueueApi, CSRF_HEADER};
pub use handle::{ClientEvent, ClientHandle};
pub use types::{ApiError, ApiRequest, ApiResponse, FailureKind, HttpMethod, RequestId};
