//! Static configuration, read-only after construction.

use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.flexoffers.com/v3";
pub const DEFAULT_CONTENT_BASE_URL: &str = "https://content.flexlinks.com";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the FlexOffers endpoints.
///
/// Built once and never mutated afterwards; concurrent operations share
/// it freely. The credential is configuration, not source: it comes from
/// the builder or `FLEXOFFERS_API_KEY`, and callers may still override it
/// per call.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// REST/XML endpoint root (`/domains`, `/promotions`).
    pub base_url: String,
    /// FlexLinks content endpoint root (program catalog, applications).
    pub content_base_url: String,
    /// Default credential applied when a call supplies none.
    pub api_key: Option<String>,
    /// Per-request timeout; expiry is terminal, never retried.
    pub timeout: Duration,
    /// Skip certificate validation toward the upstream.
    ///
    /// SECURITY: defaults to `true` because the incumbent deployment runs
    /// against an upstream whose chain does not validate; this is a known
    /// regression tracked in DESIGN.md, not an endorsement. Set
    /// `FLEXOFFERS_VERIFY_TLS=1` (or use the builder) to enforce
    /// validation once the upstream trust chain is confirmed.
    pub danger_accept_invalid_certs: bool,
}

impl ApiConfig {
    /// Environment-driven configuration with production defaults.
    ///
    /// Recognized variables: `FLEXOFFERS_BASE_URL`,
    /// `FLEXOFFERS_CONTENT_BASE_URL`, `FLEXOFFERS_API_KEY`,
    /// `FLEXOFFERS_HTTP_TIMEOUT_SECS`, `FLEXOFFERS_VERIFY_TLS`.
    pub fn from_env() -> Self {
        let timeout_secs = env::var("FLEXOFFERS_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let verify_tls = env::var("FLEXOFFERS_VERIFY_TLS")
            .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            base_url: env::var("FLEXOFFERS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            content_base_url: env::var("FLEXOFFERS_CONTENT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CONTENT_BASE_URL.to_string()),
            api_key: env::var("FLEXOFFERS_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            timeout: Duration::from_secs(timeout_secs),
            danger_accept_invalid_certs: !verify_tls,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
