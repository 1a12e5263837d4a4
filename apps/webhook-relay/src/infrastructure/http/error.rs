//! Webhook request errors.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::IntentError;

/// Why a webhook request could not be relayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Body absent, blank, `null` or `{}`.
    #[error("No JSON received")]
    EmptyBody,

    /// Body is not valid JSON.
    #[error("Invalid JSON: {0}")]
    MalformedJson(String),

    /// Body is JSON but does not match the alert schema.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// No `action` / `command` field.
    #[error("Missing required field: action")]
    MissingAction,

    /// Discriminator value not recognized.
    #[error("Unknown action: {0}. Use 'buy', 'sell', 'open' or 'close'")]
    UnknownAction(String),

    /// A field required by the action is missing or invalid.
    #[error(transparent)]
    Intent(#[from] IntentError),

    /// Unexpected failure while handling the request.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebhookError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
