//! Relay Alert Use Case
//!
//! Forwards one validated [`OrderIntent`] to the broker and classifies what
//! came back. Exactly one broker call per intent, never retried.

use std::sync::Arc;

use crate::application::ports::{BrokerError, BrokerPort, BrokerResponse};
use crate::domain::OrderIntent;

/// Result of relaying a single intent.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// Brokerage answered 2xx.
    Accepted(BrokerResponse),
    /// Brokerage answered, but with a non-2xx status.
    Rejected(BrokerResponse),
    /// No usable answer (timeout, connection refused, ...).
    Failed(BrokerError),
}

impl RelayOutcome {
    /// Whether the brokerage accepted the request.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The brokerage response, if one was received.
    #[must_use]
    pub const fn response(&self) -> Option<&BrokerResponse> {
        match self {
            Self::Accepted(response) | Self::Rejected(response) => Some(response),
            Self::Failed(_) => None,
        }
    }
}

impl From<Result<BrokerResponse, BrokerError>> for RelayOutcome {
    fn from(result: Result<BrokerResponse, BrokerError>) -> Self {
        match result {
            Ok(response) if response.is_success() => Self::Accepted(response),
            Ok(response) => Self::Rejected(response),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Use case for relaying alerts to the broker.
pub struct RelayAlertUseCase<B>
where
    B: BrokerPort,
{
    broker: Arc<B>,
}

impl<B> RelayAlertUseCase<B>
where
    B: BrokerPort,
{
    /// Create a new RelayAlertUseCase.
    pub const fn new(broker: Arc<B>) -> Self {
        Self { broker }
    }

    /// Execute the use case.
    pub async fn execute(&self, intent: &OrderIntent) -> RelayOutcome {
        let result = match intent {
            OrderIntent::Open(open) => {
                tracing::info!(
                    symbol = %open.symbol(),
                    side = %open.side(),
                    volume = %open.volume(),
                    stop_loss = %open.stop_loss(),
                    take_profit = %open.take_profit(),
                    "Relaying open position"
                );
                self.broker.open_position(open).await
            }
            OrderIntent::Close(close) => {
                tracing::info!(
                    position_id = %close.position_id(),
                    volume = %close.volume(),
                    "Relaying close position"
                );
                self.broker.close_position(close).await
            }
        };

        let outcome = RelayOutcome::from(result);
        match &outcome {
            RelayOutcome::Accepted(response) => {
                tracing::info!(
                    action = %intent.kind(),
                    broker_status = response.status,
                    "Broker accepted request"
                );
            }
            RelayOutcome::Rejected(response) => {
                tracing::warn!(
                    action = %intent.kind(),
                    broker_status = response.status,
                    body = %response.body,
                    "Broker rejected request"
                );
            }
            RelayOutcome::Failed(e) => {
                tracing::error!(action = %intent.kind(), error = %e, "Broker request failed");
            }
        }
        outcome
    }
}
