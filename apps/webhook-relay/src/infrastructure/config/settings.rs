//! Relay Configuration Settings
//!
//! Configuration types for the relay, loaded once from environment variables
//! at startup. Secrets have no defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::infrastructure::broker::capitalcore::{CapitalCoreConfig, DEFAULT_TIMEOUT};

/// Bearer token for the trading API (required).
pub const ENV_AUTH_TOKEN: &str = "CAPITALCORE_AUTH_TOKEN";
/// Trading account identifier (required).
pub const ENV_ACCOUNT_ID: &str = "CAPITALCORE_ACCOUNT_ID";
/// API base URL override.
pub const ENV_API_BASE: &str = "CAPITALCORE_API_BASE";
/// Web origin override.
pub const ENV_ORIGIN: &str = "CAPITALCORE_ORIGIN";
/// User agent override.
pub const ENV_USER_AGENT: &str = "CAPITALCORE_USER_AGENT";
/// Request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "CAPITALCORE_TIMEOUT_SECS";
/// Listen address.
pub const ENV_HOST: &str = "WEBHOOK_HOST";
/// Listen port.
pub const ENV_PORT: &str = "WEBHOOK_PORT";
/// How upstream failures map to HTTP status codes.
pub const ENV_UPSTREAM_FAILURE_POLICY: &str = "UPSTREAM_FAILURE_POLICY";

/// How a failed brokerage call is reported to the webhook caller.
///
/// The body always carries `"status":"error"` and an `error` field; the
/// policy only picks the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpstreamFailurePolicy {
    /// 504 for timeouts, 502 for everything else.
    #[default]
    BadGateway,
    /// Always 200, for callers that resend on any non-2xx status.
    OkWithError,
}

impl UpstreamFailurePolicy {
    /// Parse policy from string. Unknown values fall back to the default.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "ok-with-error" | "ok" => Self::OkWithError,
            _ => Self::BadGateway,
        }
    }

    /// Get the policy name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadGateway => "bad-gateway",
            Self::OkWithError => "ok-with-error",
        }
    }
}

/// Listen address settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Bind address.
    pub host: IpAddr,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

impl ServerSettings {
    /// Socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Complete relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Listen address.
    pub server: ServerSettings,
    /// Brokerage client settings.
    pub broker: CapitalCoreConfig,
    /// Upstream failure reporting.
    pub upstream_failure_policy: UpstreamFailurePolicy,
}

impl RelayConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if required keys are missing or empty, or if an
    /// optional key holds a malformed value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_token = required(&lookup, ENV_AUTH_TOKEN)?;
        let account_id = required(&lookup, ENV_ACCOUNT_ID)?;

        let mut broker = CapitalCoreConfig::new(account_id, auth_token).with_timeout(
            parse_env_duration_secs(&lookup, ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT)?,
        );
        if let Some(api_base) = optional(&lookup, ENV_API_BASE) {
            broker = broker.with_api_base(api_base);
        }
        if let Some(origin) = optional(&lookup, ENV_ORIGIN) {
            broker = broker.with_origin(origin);
        }
        if let Some(user_agent) = optional(&lookup, ENV_USER_AGENT) {
            broker = broker.with_user_agent(user_agent);
        }

        let defaults = ServerSettings::default();
        let host = match optional(&lookup, ENV_HOST) {
            Some(host) => host.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_HOST.to_string(),
                value: host,
            })?,
            None => defaults.host,
        };
        let port = parse_env_u16(&lookup, ENV_PORT, defaults.port)?;

        let upstream_failure_policy = optional(&lookup, ENV_UPSTREAM_FAILURE_POLICY)
            .map(|s| UpstreamFailurePolicy::from_str_case_insensitive(&s))
            .unwrap_or_default();

        Ok(Self {
            server: ServerSettings { host, port },
            broker,
            upstream_failure_policy,
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable cannot be parsed.
    #[error("environment variable {key} has invalid value {value:?}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(value.to_string())
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env_u16<F>(lookup: &F, key: &str, default: u16) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).map_or(Ok(default), |v| {
        v.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: v,
        })
    })
}

fn parse_env_duration_secs<F>(
    lookup: &F,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, key) {
        None => Ok(default),
        Some(v) => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: v,
            }),
        },
    }
}
