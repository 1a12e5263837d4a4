//! Application Layer
//!
//! Port definitions and the use case that relays an alert to the broker.

pub mod ports;
pub mod use_cases;
