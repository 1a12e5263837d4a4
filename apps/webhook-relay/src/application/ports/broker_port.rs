//! Broker Port (Driven Port)
//!
//! Interface for opening and closing positions at the brokerage.
//!
//! Calls are single-attempt: an adapter never retries, and transport
//! failures come back as [`BrokerError`] values instead of panics.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{ClosePosition, OpenPosition};

/// What the brokerage answered: HTTP status plus its (opaque) JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrokerResponse {
    /// HTTP status code returned by the brokerage.
    pub status: u16,
    /// Parsed JSON body, or `{"status_code": <status>}` when the body was empty.
    pub body: Value,
}

impl BrokerResponse {
    /// Build a response from a status code and raw body text.
    ///
    /// Empty bodies become a status-code-only payload; bodies that are not
    /// JSON are kept verbatim as a JSON string.
    #[must_use]
    pub fn from_raw(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            serde_json::json!({ "status_code": status })
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self { status, body }
    }

    /// Whether the brokerage accepted the request (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level failure talking to the brokerage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrokerError {
    /// No response within the configured timeout.
    #[error("Broker request timed out: {message}")]
    Timeout {
        /// Error details.
        message: String,
    },

    /// Connection could not be established.
    #[error("Broker connection error: {message}")]
    Connection {
        /// Error details.
        message: String,
    },

    /// Any other transport failure (TLS, body read, request build).
    #[error("Broker transport error: {message}")]
    Transport {
        /// Error details.
        message: String,
    },
}

impl BrokerError {
    /// Whether the failure was a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Port for broker interactions.
#[async_trait]
pub trait BrokerPort: Send + Sync {
    /// Open a new position.
    async fn open_position(&self, request: &OpenPosition) -> Result<BrokerResponse, BrokerError>;

    /// Close (part of) an existing position.
    async fn close_position(&self, request: &ClosePosition)
    -> Result<BrokerResponse, BrokerError>;
}
