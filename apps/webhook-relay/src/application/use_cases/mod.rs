//! Use cases.

mod relay_alert;

pub use relay_alert::{RelayAlertUseCase, RelayOutcome};
