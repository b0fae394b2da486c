use std::time::Duration;

use futures_util::StreamExt;
use queue_logging::{queue_debug, queue_warn};
use reqwest::header::{HeaderName, LOCATION};
use thiserror::Error;
use url::Url;

use crate::{ApiError, ApiRequest, ApiResponse, FailureKind, HttpMethod};

/// Header carrying the anti-forgery token on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFTOKEN";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Relative hrefs are joined onto this; without it hrefs must be absolute.
    pub base_url: Option<Url>,
    pub csrf_header: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            csrf_header: CSRF_HEADER.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_body_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid csrf header name {0:?}")]
    InvalidHeader(String),
    #[error("failed to build http client: {0}")]
    Build(#[from] reqwest::Error),
    #[error("failed to start client runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

#[async_trait::async_trait]
pub trait QueueApi: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestQueueApi {
    settings: ClientSettings,
    csrf_header: HeaderName,
    client: reqwest::Client,
}

impl ReqwestQueueApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let csrf_header = HeaderName::from_bytes(settings.csrf_header.as_bytes())
            .map_err(|_| ClientError::InvalidHeader(settings.csrf_header.clone()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()?;
        Ok(Self {
            settings,
            csrf_header,
            client,
        })
    }

    pub fn resolve_url(&self, href: &str) -> Result<Url, ApiError> {
        let resolved = match &self.settings.base_url {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        resolved.map_err(|err| ApiError::new(FailureKind::InvalidUrl, format!("{href}: {err}")))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String, ApiError> {
        let max_bytes = self.settings.max_body_bytes;
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(ApiError::new(
                FailureKind::TooLarge { max_bytes },
                "response too large",
            ));
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge { max_bytes },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[async_trait::async_trait]
impl QueueApi for ReqwestQueueApi {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.resolve_url(&request.url)?;
        queue_debug!(
            "request_id={} {} {}",
            request.request_id,
            request.method,
            url
        );

        let builder = match request.method {
            HttpMethod::Post => self.client.post(url).form(&request.form),
            HttpMethod::Delete => self.client.delete(url),
        };
        let response = builder
            .header(self.csrf_header.clone(), request.csrf_token.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let body = self.read_body(response).await?;

        if !status.is_success() {
            queue_warn!(
                "request_id={} failed with {}",
                request.request_id,
                status
            );
            return Err(ApiError::new(FailureKind::HttpStatus(status.as_u16()), body));
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
            location,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
