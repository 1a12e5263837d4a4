//! CapitalCore adapter configuration.

use std::time::Duration;

/// Default REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://pro.capitalcore.com/api/v1";

/// Default web origin the trading API expects in `Origin`/`Referer`.
pub const DEFAULT_ORIGIN: &str = "https://pro.capitalcore.com";

/// Browser user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the CapitalCore broker adapter.
#[derive(Clone)]
pub struct CapitalCoreConfig {
    /// API base URL, without trailing slash.
    pub api_base: String,
    /// Trading account identifier.
    pub account_id: String,
    /// Bearer token (without the `Bearer ` prefix).
    pub auth_token: String,
    /// Web origin used for `Origin` and `Referer`.
    pub origin: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl CapitalCoreConfig {
    /// Create a new configuration with default endpoints and timeout.
    #[must_use]
    pub fn new(account_id: String, auth_token: String) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            account_id,
            auth_token,
            origin: DEFAULT_ORIGIN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the web origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Trade endpoints root for the configured account.
    #[must_use]
    pub fn trade_base_url(&self) -> String {
        format!("{}/user/account/{}/trade", self.api_base, self.account_id)
    }

    /// Open-order endpoint.
    #[must_use]
    pub fn open_order_url(&self) -> String {
        format!("{}/open-order", self.trade_base_url())
    }

    /// Close-positions endpoint.
    #[must_use]
    pub fn close_positions_url(&self) -> String {
        format!("{}/close-many-positions", self.trade_base_url())
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> String {
        let token = self.auth_token.trim();
        if token.starts_with("Bearer ") {
            token.to_string()
        } else {
            format!("Bearer {token}")
        }
    }

    /// `Referer` header value.
    #[must_use]
    pub fn referer(&self) -> String {
        format!("{}/?", self.origin)
    }
}

impl std::fmt::Debug for CapitalCoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapitalCoreConfig")
            .field("api_base", &self.api_base)
            .field("account_id", &self.account_id)
            .field("auth_token", &"[REDACTED]")
            .field("origin", &self.origin)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
