//! HTTP client wrapper for the CapitalCore trading API.
//!
//! One attempt per call. Fixed headers (bearer auth, origin, referer, user
//! agent) are installed once as client defaults.

use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Serialize;

use super::config::CapitalCoreConfig;
use super::error::CapitalCoreError;
use crate::application::ports::{BrokerError, BrokerResponse};

/// HTTP client for the CapitalCore trading API.
#[derive(Debug, Clone)]
pub struct CapitalCoreHttpClient {
    client: Client,
    open_order_url: String,
    close_positions_url: String,
}

impl CapitalCoreHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &CapitalCoreConfig) -> Result<Self, CapitalCoreError> {
        if config.auth_token.trim().is_empty() {
            return Err(CapitalCoreError::MissingCredential("auth_token"));
        }
        if config.account_id.trim().is_empty() {
            return Err(CapitalCoreError::MissingCredential("account_id"));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers(config)?)
            .build()
            .map_err(|e| CapitalCoreError::Client(e.to_string()))?;

        Ok(Self {
            client,
            open_order_url: config.open_order_url(),
            close_positions_url: config.close_positions_url(),
        })
    }

    /// POST to the open-order endpoint.
    pub async fn post_open_order<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<BrokerResponse, BrokerError> {
        self.post(&self.open_order_url, body).await
    }

    /// POST to the close-positions endpoint.
    pub async fn post_close_positions<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<BrokerResponse, BrokerError> {
        self.post(&self.close_positions_url, body).await
    }

    async fn post<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<BrokerResponse, BrokerError> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        tracing::debug!(url, status, body = %text, "Broker response received");

        Ok(BrokerResponse::from_raw(status, &text))
    }
}

fn default_headers(config: &CapitalCoreConfig) -> Result<HeaderMap, CapitalCoreError> {
    let mut authorization = header_value("authorization", &config.authorization())?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, authorization);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ORIGIN, header_value("origin", &config.origin)?);
    headers.insert(header::REFERER, header_value("referer", &config.referer())?);
    headers.insert(
        header::USER_AGENT,
        header_value("user-agent", &config.user_agent)?,
    );
    Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, CapitalCoreError> {
    HeaderValue::from_str(value).map_err(|e| CapitalCoreError::InvalidHeader {
        name,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CapitalCoreConfig {
        CapitalCoreConfig::new("1203397".to_string(), "token".to_string())
    }

    #[test]
    fn empty_token_rejected() {
        let config = CapitalCoreConfig::new("1203397".to_string(), "  ".to_string());
        assert_eq!(
            CapitalCoreHttpClient::new(&config).unwrap_err(),
            CapitalCoreError::MissingCredential("auth_token")
        );
    }

    #[test]
    fn empty_account_rejected() {
        let config = CapitalCoreConfig::new(String::new(), "token".to_string());
        assert_eq!(
            CapitalCoreHttpClient::new(&config).unwrap_err(),
            CapitalCoreError::MissingCredential("account_id")
        );
    }

    #[test]
    fn default_headers_carry_auth_and_browser_identity() {
        let headers = default_headers(&config()).unwrap();

        assert_eq!(headers[header::AUTHORIZATION], "Bearer token");
        assert!(headers[header::AUTHORIZATION].is_sensitive());
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(headers[header::ORIGIN], "https://pro.capitalcore.com");
        assert_eq!(headers[header::REFERER], "https://pro.capitalcore.com/?");
        assert!(
            headers[header::USER_AGENT]
                .to_str()
                .unwrap()
                .starts_with("Mozilla/5.0")
        );
    }

    #[test]
    fn invalid_header_value_rejected() {
        let config = config().with_user_agent("bad\nagent");
        assert!(matches!(
            CapitalCoreHttpClient::new(&config),
            Err(CapitalCoreError::InvalidHeader {
                name: "user-agent",
                ..
            })
        ));
    }

    #[test]
    fn endpoints_resolved_from_config() {
        let client = CapitalCoreHttpClient::new(&config()).unwrap();
        assert!(client.open_order_url.ends_with("/1203397/trade/open-order"));
        assert!(
            client
                .close_positions_url
                .ends_with("/1203397/trade/close-many-positions")
        );
    }
}
