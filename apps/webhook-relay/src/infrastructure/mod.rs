//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `broker/`: CapitalCore trading API adapter
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: Webhook endpoint
//!
//! - `config/`: Environment-driven startup configuration

pub mod broker;
pub mod config;
pub mod http;
