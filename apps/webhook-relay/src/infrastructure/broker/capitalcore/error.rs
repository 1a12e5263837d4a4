//! CapitalCore-specific error types.

use thiserror::Error;

use crate::application::ports::BrokerError;

/// Errors building the CapitalCore adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapitalCoreError {
    /// A credential needed for every request is empty.
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// A configured value cannot be sent as an HTTP header.
    #[error("Invalid header value for {name}: {message}")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for BrokerError {
    fn from(err: reqwest::Error) -> Self {
        let message = describe(&err);
        if err.is_timeout() {
            Self::Timeout { message }
        } else if err.is_connect() {
            Self::Connection { message }
        } else {
            Self::Transport { message }
        }
    }
}

/// Flatten a reqwest error and its sources into one line.
fn describe(err: &reqwest::Error) -> String {
    use std::error::Error as _;

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
