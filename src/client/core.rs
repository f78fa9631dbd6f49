//! Client construction and shared request plumbing.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::config::ApiConfig;
use crate::transport::{HttpRequest, HttpTransport, Transport};
use crate::{Error, Result};

/// Entry point for all FlexOffers operations.
///
/// One client is cheap to share across tasks: it holds static
/// configuration and a transport handle, and no state crosses between
/// calls — every operation fetches fresh and discards what it fetched.
pub struct FlexOffersClient {
    pub(crate) config: ApiConfig,
    pub(crate) transport: Arc<dyn Transport>,
}

impl FlexOffersClient {
    pub fn builder() -> FlexOffersClientBuilder {
        FlexOffersClientBuilder::new()
    }

    /// Build a client from environment configuration alone.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    /// GET an XML endpoint under the REST root and decode the body.
    pub(crate) async fn get_xml(
        &self,
        path: &str,
        api_key: &str,
        query: Vec<(String, String)>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let request = HttpRequest::new(url)
            .header("accept", "application/xml")
            .header("apiKey", api_key)
            .queries(query);
        tracing::debug!(url = %request.url, "issuing catalog request");
        let response = self.transport.get(request).await?;
        crate::xml::xml_to_value(&response.body)
    }

    /// GET a JSON endpoint under the content root and decode the body.
    pub(crate) async fn get_json(
        &self,
        path: &str,
        api_key: &str,
        query: Vec<(String, String)>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.config.content_base_url.trim_end_matches('/'), path);
        let request = HttpRequest::new(url).header("apikey", api_key).queries(query);
        tracing::debug!(url = %request.url, "issuing content request");
        let response = self.transport.get(request).await?;
        serde_json::from_str(&response.body).map_err(Error::from)
    }

    /// Fetch the current program catalog from the content endpoint.
    ///
    /// `cache_bust` attaches a timestamp query marker so intermediary
    /// caches cannot serve a stale catalog; the apply workflow requires
    /// this since a stale catalog could apply to the wrong program.
    /// `unsuccessful_message` is the sanitized text surfaced when the
    /// provider answers 2xx but flags the fetch as failed.
    pub(crate) async fn fetch_programs(
        &self,
        api_key: &str,
        country_code: Option<&str>,
        cache_bust: bool,
        unsuccessful_message: &str,
    ) -> Result<Vec<Value>> {
        let mut query = Vec::new();
        if let Some(code) = country_code {
            query.push(("countryCode".to_string(), code.to_string()));
        }
        if cache_bust {
            query.push(("_ts".to_string(), unix_millis().to_string()));
        }

        let payload = self
            .get_json("/chat/GetGapOpportunityPrograms", api_key, query)
            .await?;

        if !payload.get("Success").and_then(Value::as_bool).unwrap_or(false) {
            tracing::warn!("content endpoint reported an unsuccessful program fetch");
            return Err(Error::upstream(unsuccessful_message));
        }

        Ok(payload
            .get("Data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Builder for [`FlexOffersClient`].
///
/// Starts from [`ApiConfig::from_env`]; every knob can be overridden, and
/// tests substitute the transport for a recording double.
pub struct FlexOffersClientBuilder {
    config: ApiConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl FlexOffersClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ApiConfig::from_env(),
            transport: None,
        }
    }

    /// Replace the whole configuration at once.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Default credential applied when a call supplies none.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn content_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.content_base_url = url.into();
        self
    }

    /// Enforce upstream certificate validation.
    ///
    /// See [`ApiConfig::danger_accept_invalid_certs`] for why the default
    /// is currently permissive.
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.config.danger_accept_invalid_certs = !verify;
        self
    }

    /// Substitute the outbound transport (tests use a recording spy).
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<FlexOffersClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };
        Ok(FlexOffersClient {
            config: self.config,
            transport,
        })
    }
}

impl Default for FlexOffersClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
