//! Configuration loaded at process start.

mod settings;

pub use settings::{
    ConfigError, ENV_ACCOUNT_ID, ENV_API_BASE, ENV_AUTH_TOKEN, ENV_HOST, ENV_ORIGIN, ENV_PORT,
    ENV_TIMEOUT_SECS, ENV_UPSTREAM_FAILURE_POLICY, ENV_USER_AGENT, RelayConfig, ServerSettings,
    UpstreamFailurePolicy,
};
