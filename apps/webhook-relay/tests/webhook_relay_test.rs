//! End-to-end tests for the webhook relay.
//!
//! Drives the real router and the real CapitalCore adapter against a
//! `wiremock` server standing in for the brokerage.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webhook_relay::application::use_cases::RelayAlertUseCase;
use webhook_relay::infrastructure::broker::{CapitalCoreBrokerAdapter, CapitalCoreConfig};
use webhook_relay::infrastructure::config::UpstreamFailurePolicy;
use webhook_relay::infrastructure::http::{AppState, create_router};

const ACCOUNT_ID: &str = "1203397";
const TOKEN: &str = "test-token";
const OPEN_ORDER_PATH: &str = "/user/account/1203397/trade/open-order";
const CLOSE_PATH: &str = "/user/account/1203397/trade/close-many-positions";

// =============================================================================
// Helpers
// =============================================================================

fn app(api_base: &str, policy: UpstreamFailurePolicy) -> Router {
    let config = CapitalCoreConfig::new(ACCOUNT_ID.to_string(), TOKEN.to_string())
        .with_api_base(api_base)
        .with_timeout(Duration::from_millis(300));
    let broker = Arc::new(CapitalCoreBrokerAdapter::new(&config).unwrap());

    create_router(AppState {
        relay: Arc::new(RelayAlertUseCase::new(broker)),
        upstream_failure_policy: policy,
        version: "test".to_string(),
    })
}

async fn post_webhook(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "text/plain; charset=utf-8")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

/// Address nothing is listening on.
fn refused_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// =============================================================================
// Relay
// =============================================================================

#[tokio::test]
async fn buy_alert_opens_position() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPEN_ORDER_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(header("origin", "https://pro.capitalcore.com"))
        .and(body_json(json!({
            "symbol": "EURUSD_1",
            "type": "Buy",
            "volume": 0.01,
            "stop_loss": 0,
            "take_profit": 0,
            "comment": "-"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ticket": 446_148})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_webhook(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        json!({"action": "buy", "symbol": "EURUSD_1", "volume": "0.01"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["action"], "buy");
    assert_eq!(body["broker_status"], 200);
    assert_eq!(body["result"], json!({"ticket": 446_148}));
}

#[tokio::test]
async fn sell_alert_with_levels_opens_short() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPEN_ORDER_PATH))
        .and(body_json(json!({
            "symbol": "SILVER",
            "type": "Sell",
            "volume": 0.5,
            "stop_loss": 57.718,
            "take_profit": 55,
            "comment": "tv-alert"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_webhook(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        json!({
            "action": "SELL",
            "symbol": "SILVER",
            "volume": 0.5,
            "stop_loss": "57.718",
            "take_profit": 55,
            "comment": "tv-alert"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["side"], "Sell");
    assert_eq!(body["result"], json!({"status_code": 201}));
}

#[tokio::test]
async fn close_alert_closes_single_position() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CLOSE_PATH))
        .and(body_json(json!({"positions": [{"ticket": "446148", "volume": 0.01}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"closed": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_webhook(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        json!({"action": "close", "position_id": "446148"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "close");
    assert_eq!(body["position_id"], "446148");
}

#[tokio::test]
async fn legacy_alert_format_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPEN_ORDER_PATH))
        .and(body_json(json!({
            "symbol": "EURUSD_1",
            "type": "Buy",
            "volume": 0.02,
            "stop_loss": 1.05,
            "take_profit": 1.1,
            "comment": "-"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = post_webhook(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        json!({
            "command": "open",
            "side": "buy",
            "symbol": "EURUSD_1",
            "volume": 0.02,
            "sl": 1.05,
            "tp": 1.1
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn legacy_close_by_numeric_ticket() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CLOSE_PATH))
        .and(body_json(json!({"positions": [{"ticket": 446_148, "volume": 1}]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = post_webhook(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        json!({"command": "close", "ticket": 446_148, "volume": 1}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Validation: no outbound call
// =============================================================================

#[tokio::test]
async fn missing_symbol_is_rejected_without_outbound_call() {
    let server = MockServer::start().await;

    let (status, body) = post_webhook(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        json!({"action": "buy", "volume": "0.01"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Missing required field: symbol");
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn missing_position_id_is_rejected_without_outbound_call() {
    let server = MockServer::start().await;

    let (status, body) = post_webhook(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        json!({"action": "close"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required field: position_id");
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn unknown_action_is_named_in_message() {
    let server = MockServer::start().await;

    let (status, body) = post_webhook(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        json!({"action": "hedge", "symbol": "EURUSD_1"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("hedge"));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn non_positive_volume_is_rejected() {
    let server = MockServer::start().await;

    let (status, body) = post_webhook(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        json!({"action": "buy", "symbol": "EURUSD_1", "volume": "0"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid volume"));
    assert_eq!(request_count(&server).await, 0);
}

// =============================================================================
// Upstream failures
// =============================================================================

#[tokio::test]
async fn broker_rejection_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPEN_ORDER_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "market closed"})))
        .mount(&server)
        .await;

    let (status, body) = post_webhook(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        json!({"action": "buy", "symbol": "EURUSD_1"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], "error");
    assert_eq!(body["broker_status"], 422);
    assert_eq!(body["result"]["error"], "market closed");
}

#[tokio::test]
async fn timeout_is_reported_and_next_request_is_served() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPEN_ORDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CLOSE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let router = app(&server.uri(), UpstreamFailurePolicy::default());

    let (status, body) = post_webhook(
        router.clone(),
        json!({"action": "buy", "symbol": "EURUSD_1"}),
    )
    .await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["status"], "error");
    assert!(!body["error"].as_str().unwrap().is_empty());

    let (status, _) = post_webhook(router, json!({"action": "close", "position_id": 1})).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn connection_refused_is_bad_gateway() {
    let (status, body) = post_webhook(
        app(&refused_base(), UpstreamFailurePolicy::default()),
        json!({"action": "close", "position_id": "446148"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], "error");
    assert!(body.get("broker_status").is_none());
}

#[tokio::test]
async fn ok_with_error_policy_answers_200_on_failure() {
    let (status, body) = post_webhook(
        app(&refused_base(), UpstreamFailurePolicy::OkWithError),
        json!({"action": "buy", "symbol": "EURUSD_1"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert!(body["error"].is_string());
}

// =============================================================================
// Other routes
// =============================================================================

#[tokio::test]
async fn health_is_ok_while_broker_is_down() {
    let (status, body) = get(
        app(&refused_base(), UpstreamFailurePolicy::default()),
        "/health",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "version": "test"}));
}

#[tokio::test]
async fn get_webhook_returns_usage() {
    let server = MockServer::start().await;
    let (status, body) = get(
        app(&server.uri(), UpstreamFailurePolicy::default()),
        "/webhook",
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body["example"].is_object());
}

#[tokio::test]
async fn index_lists_endpoints() {
    let server = MockServer::start().await;
    let (status, body) = get(app(&server.uri(), UpstreamFailurePolicy::default()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"].as_array().unwrap().len() >= 3);
}
