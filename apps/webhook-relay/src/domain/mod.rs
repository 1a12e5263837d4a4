//! Domain Layer
//!
//! Alert intents and their validation rules. No I/O lives here.
//!
//! - [`order_intent`]: `OrderIntent` (buy / sell / close) and its parameters
//! - [`value_objects`]: `Symbol`, `TradeSide`, `PositionId`, volume defaults
//! - [`errors`]: `IntentError` for rejected alert fields

pub mod errors;
pub mod order_intent;
pub mod value_objects;

pub use errors::IntentError;
pub use order_intent::{ClosePosition, IntentKind, OpenPosition, OrderIntent};
pub use value_objects::{PositionId, Symbol, TradeSide, default_volume};
