// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Webhook Relay
//!
//! Receives trading alerts over HTTP and relays them as open/close orders to
//! the CapitalCore brokerage.
//!
//! # Architecture (Hexagonal)
//!
//! - **Domain**: `OrderIntent`, its value objects and validation
//! - **Application**: `BrokerPort` and the `RelayAlert` use case
//! - **Infrastructure**: CapitalCore HTTP adapter, axum webhook server,
//!   environment configuration
//!
//! Each alert produces at most one outbound request. Nothing is retried,
//! queued or persisted.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - alert intents and validation.
pub mod domain;

/// Application layer - use cases and port definitions.
pub mod application;

/// Infrastructure layer - adapters and configuration.
pub mod infrastructure;

pub use application::ports::{BrokerError, BrokerPort, BrokerResponse};
pub use application::use_cases::{RelayAlertUseCase, RelayOutcome};
pub use domain::{IntentError, OrderIntent, PositionId, Symbol, TradeSide};
pub use infrastructure::broker::{CapitalCoreBrokerAdapter, CapitalCoreConfig};
pub use infrastructure::config::{RelayConfig, UpstreamFailurePolicy};
pub use infrastructure::http::{AppState, create_router};
