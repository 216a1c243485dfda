//! Error types for the Nimbus SDK runtime.
//!
//! A failed call stores its error once and re-raises it on every later
//! accessor, so [`NimbusError`] is `Clone` and every variant carries owned
//! data. Protocol failures keep the originating status and raw body for
//! diagnostics.

use bytes::Bytes;
use http::StatusCode;

/// Error type for all Nimbus SDK runtime operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NimbusError {
    /// The request never produced a response (connection failure, timeout,
    /// I/O error while producing body bytes).
    #[error("transport failure: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The service answered, but with a non-success status.
    #[error("service returned {status}: {message}")]
    Protocol {
        /// HTTP status of the failed response.
        status: StatusCode,
        /// Human-readable summary of the failure.
        message: String,
        /// Raw response body, available for provider-specific decoding.
        body: Bytes,
    },

    /// A success response could not be decoded into the expected shape.
    #[error("failed to decode response: {message}")]
    Parse {
        /// Description of the decode failure.
        message: String,
    },

    /// The caller violated a usage contract (re-entrant resolution,
    /// exhausted mock script, and similar).
    #[error("invalid usage: {message}")]
    Usage {
        /// Description of the contract violation.
        message: String,
    },
}

impl NimbusError {
    /// Create a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a protocol error from a failed response's status and body.
    #[must_use]
    pub fn protocol(status: StatusCode, body: Bytes) -> Self {
        let message = status
            .canonical_reason()
            .unwrap_or("unrecognized status")
            .to_owned();
        Self::Protocol {
            status,
            message,
            body,
        }
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a usage error.
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// The HTTP status of a protocol error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw response body of a protocol error, if this is one.
    #[must_use]
    pub fn raw_body(&self) -> Option<&Bytes> {
        match self {
            Self::Protocol { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NimbusError {
    fn from(err: std::io::Error) -> Self {
        Self::transport(err.to_string())
    }
}

/// Convenience result type for Nimbus SDK operations.
pub type NimbusResult<T> = Result<T, NimbusError>;
