//! Webhook Relay Binary
//!
//! Starts the alert webhook server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin webhook-relay
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `CAPITALCORE_AUTH_TOKEN`: Bearer token for the trading API
//! - `CAPITALCORE_ACCOUNT_ID`: Trading account id
//!
//! ## Optional
//! - `CAPITALCORE_API_BASE`: API base URL (default: <https://pro.capitalcore.com/api/v1>)
//! - `CAPITALCORE_ORIGIN`: Origin / Referer host (default: <https://pro.capitalcore.com>)
//! - `CAPITALCORE_USER_AGENT`: User-Agent header (default: desktop Chrome)
//! - `CAPITALCORE_TIMEOUT_SECS`: Per-request timeout (default: 10)
//! - `WEBHOOK_HOST`: Listen address (default: 0.0.0.0)
//! - `WEBHOOK_PORT`: Listen port (default: 8080)
//! - `UPSTREAM_FAILURE_POLICY`: `bad-gateway` | `ok-with-error` (default: bad-gateway)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use webhook_relay::application::use_cases::RelayAlertUseCase;
use webhook_relay::infrastructure::broker::CapitalCoreBrokerAdapter;
use webhook_relay::infrastructure::config::RelayConfig;
use webhook_relay::infrastructure::http::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    init_tracing();

    tracing::info!("Starting webhook relay");

    let config = RelayConfig::from_env()?;
    log_config(&config);

    let broker = Arc::new(CapitalCoreBrokerAdapter::new(&config.broker)?);
    let state = AppState {
        relay: Arc::new(RelayAlertUseCase::new(broker)),
        upstream_failure_policy: config.upstream_failure_policy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let app = create_router(state);

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  POST /webhook");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Webhook relay stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses a static directive string that is guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "webhook_relay=info"
                    .parse()
                    .expect("static directive 'webhook_relay=info' is valid"),
            ),
        )
        .init();
}

/// Log the parsed configuration. Credentials are never logged.
fn log_config(config: &RelayConfig) {
    tracing::info!(
        account_id = %config.broker.account_id,
        api_base = %config.broker.api_base,
        timeout_secs = config.broker.timeout.as_secs(),
        upstream_failure_policy = config.upstream_failure_policy.as_str(),
        "Configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
