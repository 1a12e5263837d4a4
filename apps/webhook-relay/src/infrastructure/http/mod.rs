//! HTTP/REST API adapter.
//!
//! Inbound adapter exposing the webhook endpoint and delegating to the relay use case.

mod controller;
mod error;
mod request;
mod response;

pub use controller::{AppState, create_router, relay_status};
pub use error::WebhookError;
pub use request::{AlertAction, WebhookPayload};
pub use response::{
    EndpointInfo, HealthResponse, ResponseStatus, ServiceInfo, UsageResponse, WebhookResponse,
};
