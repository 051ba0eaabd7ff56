//! HTTP transport seam.
//!
//! Fetchers talk to a [`Transport`] rather than to reqwest directly so that the
//! retrieval logic can be exercised against scripted responses.

use crate::config::HttpConfig;
use crate::endpoints::RequestTarget;
use crate::error::{Error, Result};

/// Status and body of a completed request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body; left empty for non-200 responses
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Build a response from a status and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Abstraction over GET requests, enabling testability.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request. Non-200 statuses are returned as responses, not errors;
    /// `Err` means no response arrived (connect failure, timeout, reset).
    async fn get(&self, target: &RequestTarget) -> Result<TransportResponse>;
}

/// Production [`Transport`] backed by a pooled reqwest client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the given timeouts and user agent
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, target: &RequestTarget) -> Result<TransportResponse> {
        let mut request = self.client.get(target.url.clone());
        for (name, value) in target.headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Ok(TransportResponse::new(status, Vec::new()));
        }

        let body = response.bytes().await?;
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

/// Why a request produced no usable payload
#[derive(Debug)]
pub(crate) enum FetchFailure {
    Status(u16),
    Transport(Error),
    Body(serde_json::Error),
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Status(status) => write!(f, "HTTP status {status}"),
            FetchFailure::Transport(e) => write!(f, "transport error: {e}"),
            FetchFailure::Body(e) => write!(f, "invalid JSON body: {e}"),
        }
    }
}

/// GET `target` and parse a 200 body as JSON.
///
/// Any other status, a transport error and an unparsable body are all failures;
/// callers decide whether that failure is fatal.
pub(crate) async fn fetch_json(
    transport: &dyn Transport,
    target: &RequestTarget,
) -> std::result::Result<serde_json::Value, FetchFailure> {
    let response = transport
        .get(target)
        .await
        .map_err(FetchFailure::Transport)?;

    if response.status != 200 {
        return Err(FetchFailure::Status(response.status));
    }

    let payload = serde_json::from_slice(&response.body).map_err(FetchFailure::Body)?;
    tracing::trace!(url = %target.url, label = %target.label, "fetched");
    Ok(payload)
}
