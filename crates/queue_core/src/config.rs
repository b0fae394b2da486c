use std::time::Duration;

use crate::ClickRouter;

/// How long a success message stays visible before it is hidden.
pub const SUCCESS_MESSAGE_TTL: Duration = Duration::from_millis(1500);

/// Form field carrying the entry identifier on ingest.
pub const DEFAULT_IDENTIFIER_FIELD: &str = "pmcid";

/// What happens to an entry's status when its request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Entry stays `working`; further clicks on it are ignored.
    Retain,
    /// Entry returns to the status it had before the click.
    #[default]
    Restore,
}

/// Page-level values injected into the controller at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub csrf_token: String,
    pub identifier_field: String,
    pub success_message_ttl: Duration,
    pub failure_policy: FailurePolicy,
    pub router: ClickRouter,
}

impl QueueConfig {
    pub fn new(csrf_token: impl Into<String>) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            ..Self::default()
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            csrf_token: String::new(),
            identifier_field: DEFAULT_IDENTIFIER_FIELD.to_string(),
            success_message_ttl: SUCCESS_MESSAGE_TTL,
            failure_policy: FailurePolicy::default(),
            router: ClickRouter::default(),
        }
    }
}
