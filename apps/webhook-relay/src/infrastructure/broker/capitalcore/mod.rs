//! CapitalCore Broker Adapter
//!
//! Implementation of `BrokerPort` for the CapitalCore trading REST API:
//! - `open-order` for new buy / sell positions
//! - `close-many-positions` for closing a position by ticket
//! - Bearer auth plus the browser headers the web API expects
//! - Single attempt per call with a bounded timeout

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::CapitalCoreBrokerAdapter;
pub use api_types::{ClosePositionEntry, ClosePositionsRequest, OpenOrderRequest};
pub use config::{
    CapitalCoreConfig, DEFAULT_API_BASE, DEFAULT_ORIGIN, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
pub use error::CapitalCoreError;
