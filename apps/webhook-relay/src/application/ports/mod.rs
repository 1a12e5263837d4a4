//! Ports (interfaces) implemented by infrastructure adapters.

mod broker_port;

pub use broker_port::{BrokerError, BrokerPort, BrokerResponse};
