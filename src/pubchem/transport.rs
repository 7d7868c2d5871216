//! Blocking HTTP transport seam.
//!
//! The PubChem client only ever issues `GET` requests and reads the body as
//! text, so the seam is a single method. Tests substitute an in-memory
//! transport; production uses [`UreqTransport`], usually wrapped in a
//! [`CachedTransport`](super::cache::CachedTransport).

use std::{fmt, sync::Arc, time::Duration};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as UTF-8 text.
    pub body: String,
}

impl HttpResponse {
    /// A `200 OK` response with the given body.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to complete an HTTP exchange at all (as opposed to a non-2xx
/// status, which is a successful exchange).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection, TLS, or protocol failure.
    Request(String),
    /// Response body could not be read as text.
    Body(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(msg) => write!(f, "request failed: {msg}"),
            Self::Body(msg) => write!(f, "failed to read response: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Issues blocking `GET` requests.
///
/// Implementations must be shareable across threads: the structure and
/// property fetches run concurrently.
pub trait Transport: Send + Sync {
    /// Fetch `url` and return its status and body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no HTTP response was obtained.
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }
}

/// [`Transport`] backed by a `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Build an agent that reports 4xx/5xx as ordinary responses.
    ///
    /// `timeout` bounds each whole request; `None` keeps ureq's defaults.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .user_agent(concat!("molstudio/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
