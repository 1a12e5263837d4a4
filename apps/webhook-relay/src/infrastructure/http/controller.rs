//! HTTP Controller (Driver Adapter)
//!
//! Axum routes for the webhook relay. The webhook handler never lets a
//! failure escape: bad input, upstream failures and panics all come back as
//! a JSON envelope.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use futures::FutureExt;
use tracing::Instrument;
use uuid::Uuid;

use super::error::WebhookError;
use super::request::WebhookPayload;
use super::response::{HealthResponse, ServiceInfo, UsageResponse, WebhookResponse};
use crate::application::ports::BrokerPort;
use crate::application::use_cases::{RelayAlertUseCase, RelayOutcome};
use crate::infrastructure::config::UpstreamFailurePolicy;

/// Application state shared across handlers.
pub struct AppState<B>
where
    B: BrokerPort,
{
    /// Use case for relaying alerts.
    pub relay: Arc<RelayAlertUseCase<B>>,
    /// HTTP status mapping for upstream failures.
    pub upstream_failure_policy: UpstreamFailurePolicy,
    /// Application version.
    pub version: String,
}

impl<B> Clone for AppState<B>
where
    B: BrokerPort,
{
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
            upstream_failure_policy: self.upstream_failure_policy,
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<B>(state: AppState<B>) -> Router
where
    B: BrokerPort + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/webhook", get(webhook_usage).post(webhook))
        .with_state(state)
}

/// Service description.
async fn index<B>(State(state): State<AppState<B>>) -> impl IntoResponse
where
    B: BrokerPort,
{
    Json(ServiceInfo::new(state.version.clone()))
}

/// Health check endpoint. Does not touch the brokerage.
async fn health_check<B>(State(state): State<AppState<B>>) -> impl IntoResponse
where
    B: BrokerPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn webhook_usage() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(UsageResponse::default()),
    )
}

/// Relay one alert.
///
/// The body is read as raw bytes so callers sending `text/plain` are
/// accepted.
async fn webhook<B>(State(state): State<AppState<B>>, body: Bytes) -> Response
where
    B: BrokerPort,
{
    let request_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!("webhook", request_id = %request_id);

    let handled = AssertUnwindSafe(relay(&state, &body))
        .catch_unwind()
        .instrument(span.clone())
        .await;

    let (status, envelope) = span.in_scope(|| match handled {
        Ok(Ok(relayed)) => relayed,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Webhook rejected");
            (e.status_code(), WebhookResponse::from_error(&e))
        }
        Err(panic) => {
            let e = WebhookError::Internal(panic_message(panic.as_ref()));
            tracing::error!(error = %e, "Webhook handler panicked");
            (e.status_code(), WebhookResponse::from_error(&e))
        }
    });

    (status, Json(envelope.with_request_id(request_id))).into_response()
}

async fn relay<B>(
    state: &AppState<B>,
    body: &[u8],
) -> Result<(StatusCode, WebhookResponse), WebhookError>
where
    B: BrokerPort,
{
    let intent = WebhookPayload::from_body(body)?.into_intent()?;
    let outcome = state.relay.execute(&intent).await;
    let status = relay_status(&outcome, state.upstream_failure_policy);
    Ok((status, WebhookResponse::from_outcome(&intent, &outcome)))
}

/// HTTP status for a relay outcome under the given policy.
#[must_use]
pub const fn relay_status(outcome: &RelayOutcome, policy: UpstreamFailurePolicy) -> StatusCode {
    match (outcome, policy) {
        (RelayOutcome::Accepted(_), _) | (_, UpstreamFailurePolicy::OkWithError) => {
            StatusCode::OK
        }
        (RelayOutcome::Failed(e), UpstreamFailurePolicy::BadGateway) if e.is_timeout() => {
            StatusCode::GATEWAY_TIMEOUT
        }
        (_, UpstreamFailurePolicy::BadGateway) => StatusCode::BAD_GATEWAY,
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_string())
}
