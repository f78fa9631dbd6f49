//! Shared test support: a scripted transport double.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use flexoffers_lib_rust::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use flexoffers_lib_rust::{ApiConfig, FlexOffersClient};

/// Transport double that records every request and replays scripted
/// responses in order. An exhausted script is a test bug and surfaces as
/// a transport error rather than a panic inside the client.
pub struct SpyTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<Vec<Result<HttpResponse, TransportError>>>,
}

impl SpyTransport {
    pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        }
    }

    /// Script a sequence of 200 responses with the given bodies.
    pub fn ok(bodies: &[&str]) -> Arc<Self> {
        Arc::new(Self::new(
            bodies
                .iter()
                .map(|body| {
                    Ok(HttpResponse {
                        status: 200,
                        body: body.to_string(),
                    })
                })
                .collect(),
        ))
    }

    /// Script a single failing call.
    pub fn failing(error: TransportError) -> Arc<Self> {
        Arc::new(Self::new(vec![Err(error)]))
    }

    pub fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for SpyTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(TransportError::Other("no scripted response left".into()));
        }
        responses.remove(0)
    }
}

/// Deterministic configuration: nothing read from the environment, no
/// default credential unless a test sets one.
pub fn test_config() -> ApiConfig {
    ApiConfig {
        base_url: "https://api.flexoffers.test/v3".to_string(),
        content_base_url: "https://content.flexlinks.test".to_string(),
        api_key: None,
        timeout: Duration::from_secs(10),
        danger_accept_invalid_certs: false,
    }
}

pub fn client_with(transport: Arc<SpyTransport>) -> FlexOffersClient {
    FlexOffersClient::builder()
        .config(test_config())
        .transport(transport)
        .build()
        .expect("spy-backed client builds without touching the network")
}

/// Query value by key from a recorded request.
pub fn query_value<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// Header value by (case-insensitive) name from a recorded request.
pub fn header_value<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|(header, _)| header.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
