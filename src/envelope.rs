//! The uniform response envelope shared by every operation.
//!
//! Callers always receive a `{status, message|data, ...}` structure,
//! regardless of which operation ran or how it failed. The invariant:
//! `success` carries `data` (possibly an empty collection); every other
//! status carries `message` and no `data`.

use crate::Error;
use serde::Serialize;
use serde_json::Value;

/// Terminal status of a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    MissingApiKey,
    MissingName,
    MissingProgramName,
    TermsNotAccepted,
    TermsRejected,
    ProgramNotFound,
    Error,
}

/// The wrapper every operation returns.
///
/// Optional fields are omitted from the serialized form entirely, so the
/// JSON shape stays minimal: pagination only appears on paginated
/// operations, `message` only where there is guidance to give.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl ResponseEnvelope {
    pub fn success(data: Value) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
            total_count: None,
            page: None,
            page_size: None,
        }
    }

    /// A non-success outcome. `status` must not be [`Status::Success`];
    /// rejections carry guidance text and never carry data.
    pub fn rejection(status: Status, message: impl Into<String>) -> Self {
        debug_assert!(status != Status::Success);
        Self {
            status,
            message: Some(message.into()),
            data: None,
            total_count: None,
            page: None,
            page_size: None,
        }
    }

    pub fn with_total_count(mut self, total_count: i64) -> Self {
        self.total_count = Some(total_count);
        self
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    /// Success envelopes may still carry advisory text.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// JSON form handed across the tool boundary.
    pub fn to_json(&self) -> String {
        // Serializing this struct cannot fail; fall back to a bare error
        // envelope rather than panicking at the boundary.
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|_| r#"{"status":"error","message":"Unexpected error: serialization failed"}"#.to_string())
    }
}

/// Fold a failure raised below the operation boundary into the `error`
/// status. Transport failures keep their detail under the request-failure
/// template; provider-reported failures pass their sanitized message
/// through verbatim; anything else is reported as unexpected.
pub fn classify_failure(err: &Error) -> ResponseEnvelope {
    let message = match err {
        Error::Transport(e) => format!("API request failed: {}", e),
        Error::Upstream { message } => message.clone(),
        other => format!("Unexpected error: {}", other),
    };
    ResponseEnvelope::rejection(Status::Error, message)
}
