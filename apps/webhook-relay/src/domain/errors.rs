//! Domain validation errors.

use thiserror::Error;

/// Reasons an alert cannot be turned into an [`OrderIntent`](super::OrderIntent).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    /// A field required for the chosen action is absent or empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Inbound field name.
        field: &'static str,
    },

    /// A field is present but its value is unusable.
    #[error("Invalid {field}: {message}")]
    InvalidField {
        /// Inbound field name.
        field: &'static str,
        /// What is wrong with the value.
        message: String,
    },
}

impl IntentError {
    /// Shorthand for [`IntentError::InvalidField`].
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }
}
