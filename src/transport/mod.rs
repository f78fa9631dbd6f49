//! Outbound HTTP seam.
//!
//! Operations talk to the upstream through the [`Transport`] trait so the
//! wire can be swapped out in tests. The production implementation is
//! [`HttpTransport`] over reqwest.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;

/// A single outbound GET, fully assembled by the caller.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn queries(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }
}

/// Body of a 2xx upstream response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The HTTP collaborator every operation depends on.
///
/// Implementations must surface timeouts and non-2xx statuses as
/// [`TransportError`]; callers treat any error as terminal and never
/// retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Transport error: {0}")]
    Other(String),
}
