//! CapitalCore broker adapter implementing BrokerPort.

use async_trait::async_trait;

use crate::application::ports::{BrokerError, BrokerPort, BrokerResponse};
use crate::domain::{ClosePosition, OpenPosition};

use super::api_types::{ClosePositionsRequest, OpenOrderRequest};
use super::config::CapitalCoreConfig;
use super::error::CapitalCoreError;
use super::http_client::CapitalCoreHttpClient;

/// CapitalCore broker adapter.
///
/// Implements `BrokerPort` for the CapitalCore trading API.
#[derive(Debug, Clone)]
pub struct CapitalCoreBrokerAdapter {
    client: CapitalCoreHttpClient,
    account_id: String,
}

impl CapitalCoreBrokerAdapter {
    /// Create a new CapitalCore broker adapter.
    pub fn new(config: &CapitalCoreConfig) -> Result<Self, CapitalCoreError> {
        let client = CapitalCoreHttpClient::new(config)?;
        Ok(Self {
            client,
            account_id: config.account_id.clone(),
        })
    }
}

#[async_trait]
impl BrokerPort for CapitalCoreBrokerAdapter {
    async fn open_position(&self, request: &OpenPosition) -> Result<BrokerResponse, BrokerError> {
        let body = OpenOrderRequest::from(request);

        tracing::info!(
            account_id = %self.account_id,
            symbol = %body.symbol,
            side = %body.side,
            volume = %body.volume,
            "Submitting open order to CapitalCore"
        );

        let response = self.client.post_open_order(&body).await?;

        tracing::info!(
            symbol = %body.symbol,
            status = response.status,
            response = %response.body,
            "Open order response"
        );

        Ok(response)
    }

    async fn close_position(
        &self,
        request: &ClosePosition,
    ) -> Result<BrokerResponse, BrokerError> {
        let body = ClosePositionsRequest::from(request);

        tracing::info!(
            account_id = %self.account_id,
            ticket = %request.position_id(),
            volume = %request.volume(),
            "Submitting close position to CapitalCore"
        );

        let response = self.client.post_close_positions(&body).await?;

        tracing::info!(
            ticket = %request.position_id(),
            status = response.status,
            response = %response.body,
            "Close position response"
        );

        Ok(response)
    }
}
