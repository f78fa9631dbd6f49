use crate::transport::TransportError;
use thiserror::Error;

/// Unified error type for the FlexOffers toolkit.
///
/// This aggregates every failure an operation can hit below its boundary.
/// No variant escapes a public operation: the boundary folds errors into
/// the `error` envelope status via [`crate::envelope::classify_failure`],
/// which distinguishes transport failures from everything else.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("XML decode error: {0}")]
    Xml(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The provider answered 2xx but reported a failure in the payload.
    /// The message is sanitized at the call site; upstream response
    /// bodies are never carried here.
    #[error("{message}")]
    Upstream { message: String },
}

impl Error {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Error::Upstream {
            message: msg.into(),
        }
    }
}
