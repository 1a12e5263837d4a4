//! HTTP response DTOs.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use super::error::WebhookError;
use crate::application::use_cases::RelayOutcome;
use crate::domain::{IntentKind, OrderIntent, PositionId, TradeSide};

/// Envelope status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// Relayed and accepted.
    Ok,
    /// Anything else.
    Error,
}

/// Envelope returned by `POST /webhook`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookResponse {
    /// `ok` or `error`.
    pub status: ResponseStatus,
    /// Correlates the response with server logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// What was relayed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<IntentKind>,
    /// Symbol, for buy / sell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Side, for buy / sell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<TradeSide>,
    /// Ticket, for close.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<PositionId>,
    /// Caller-side failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Upstream failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// HTTP status returned by the brokerage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_status: Option<u16>,
    /// Brokerage payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl WebhookResponse {
    fn for_intent(status: ResponseStatus, intent: &OrderIntent) -> Self {
        let mut response = Self::bare(status);
        response.action = Some(intent.kind());
        match intent {
            OrderIntent::Open(open) => {
                response.symbol = Some(open.symbol().to_string());
                response.side = Some(open.side());
            }
            OrderIntent::Close(close) => {
                response.position_id = Some(close.position_id().clone());
            }
        }
        response
    }

    const fn bare(status: ResponseStatus) -> Self {
        Self {
            status,
            request_id: None,
            action: None,
            symbol: None,
            side: None,
            position_id: None,
            message: None,
            error: None,
            broker_status: None,
            result: None,
        }
    }

    /// Envelope for a relay outcome.
    #[must_use]
    pub fn from_outcome(intent: &OrderIntent, outcome: &RelayOutcome) -> Self {
        match outcome {
            RelayOutcome::Accepted(response) => {
                let mut envelope = Self::for_intent(ResponseStatus::Ok, intent);
                envelope.broker_status = Some(response.status);
                envelope.result = Some(response.body.clone());
                envelope
            }
            RelayOutcome::Rejected(response) => {
                let mut envelope = Self::for_intent(ResponseStatus::Error, intent);
                envelope.error = Some(format!(
                    "Broker responded with status {}",
                    response.status
                ));
                envelope.broker_status = Some(response.status);
                envelope.result = Some(response.body.clone());
                envelope
            }
            RelayOutcome::Failed(e) => {
                let mut envelope = Self::for_intent(ResponseStatus::Error, intent);
                envelope.error = Some(e.to_string());
                envelope
            }
        }
    }

    /// Envelope for a request that never reached the brokerage.
    #[must_use]
    pub fn from_error(error: &WebhookError) -> Self {
        let mut envelope = Self::bare(ResponseStatus::Error);
        envelope.message = Some(error.to_string());
        envelope
    }

    /// Attach the request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(WebhookResponse::from_error(&self))).into_response()
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// One route in [`ServiceInfo`].
#[derive(Debug, Clone, Serialize)]
pub struct EndpointInfo {
    /// HTTP method.
    pub method: &'static str,
    /// Route path.
    pub path: &'static str,
    /// What the route does.
    pub description: &'static str,
}

/// Static description served on `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: String,
    /// One-line summary.
    pub description: &'static str,
    /// Available routes.
    pub endpoints: Vec<EndpointInfo>,
}

impl ServiceInfo {
    /// Describe this service.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            service: "webhook-relay",
            version: version.into(),
            description: "Relays trading alerts to the CapitalCore brokerage",
            endpoints: vec![
                EndpointInfo {
                    method: "POST",
                    path: "/webhook",
                    description: "Relay a buy, sell or close alert",
                },
                EndpointInfo {
                    method: "GET",
                    path: "/health",
                    description: "Liveness check",
                },
                EndpointInfo {
                    method: "GET",
                    path: "/",
                    description: "This description",
                },
            ],
        }
    }
}

/// Body of `GET /webhook`.
#[derive(Debug, Clone, Serialize)]
pub struct UsageResponse {
    /// Always `error`.
    pub status: ResponseStatus,
    /// How to call the endpoint.
    pub message: &'static str,
    /// Example payloads.
    pub example: Value,
}

impl Default for UsageResponse {
    fn default() -> Self {
        Self {
            status: ResponseStatus::Error,
            message: "Use POST with a JSON body",
            example: json!({
                "buy": {
                    "action": "buy",
                    "symbol": "EURUSD_1",
                    "volume": "0.01",
                    "stop_loss": "0",
                    "take_profit": "0"
                },
                "close": {
                    "action": "close",
                    "position_id": "446148",
                    "volume": "0.01"
                }
            }),
        }
    }
}
