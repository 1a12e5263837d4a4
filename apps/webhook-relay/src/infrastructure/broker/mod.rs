//! Broker Adapters
//!
//! Implementations of `BrokerPort` for supported brokerages.

pub mod capitalcore;

pub use capitalcore::{CapitalCoreBrokerAdapter, CapitalCoreConfig, CapitalCoreError};
