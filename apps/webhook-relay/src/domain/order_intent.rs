//! Order intents decoded from alerts.
//!
//! An intent lives for exactly one webhook request: it is built from the
//! inbound payload, handed to the broker port and dropped with the response.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::errors::IntentError;
use super::value_objects::{PositionId, Symbol, TradeSide, default_volume};

/// Comment attached to opened positions when the alert sends none.
pub const DEFAULT_COMMENT: &str = "-";

/// Parameters of a new position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPosition {
    symbol: Symbol,
    side: TradeSide,
    volume: Decimal,
    stop_loss: Decimal,
    take_profit: Decimal,
    comment: String,
}

impl OpenPosition {
    /// Create an open-position intent with default volume, no stop-loss,
    /// no take-profit and the default comment.
    #[must_use]
    pub fn new(symbol: Symbol, side: TradeSide) -> Self {
        Self {
            symbol,
            side,
            volume: default_volume(),
            stop_loss: Decimal::ZERO,
            take_profit: Decimal::ZERO,
            comment: DEFAULT_COMMENT.to_string(),
        }
    }

    /// Set the volume. Must be strictly positive.
    pub fn with_volume(mut self, volume: Decimal) -> Result<Self, IntentError> {
        self.volume = positive_volume(volume)?;
        Ok(self)
    }

    /// Set the stop-loss price. Zero means unset.
    pub fn with_stop_loss(mut self, price: Decimal) -> Result<Self, IntentError> {
        self.stop_loss = non_negative_price("stop_loss", price)?;
        Ok(self)
    }

    /// Set the take-profit price. Zero means unset.
    pub fn with_take_profit(mut self, price: Decimal) -> Result<Self, IntentError> {
        self.take_profit = non_negative_price("take_profit", price)?;
        Ok(self)
    }

    /// Set the order comment. Blank comments fall back to the default.
    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        let comment = comment.trim();
        self.comment = if comment.is_empty() {
            DEFAULT_COMMENT.to_string()
        } else {
            comment.to_string()
        };
        self
    }

    /// Instrument symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Position direction.
    #[must_use]
    pub const fn side(&self) -> TradeSide {
        self.side
    }

    /// Position size in lots.
    #[must_use]
    pub const fn volume(&self) -> Decimal {
        self.volume
    }

    /// Stop-loss price (zero = unset).
    #[must_use]
    pub const fn stop_loss(&self) -> Decimal {
        self.stop_loss
    }

    /// Take-profit price (zero = unset).
    #[must_use]
    pub const fn take_profit(&self) -> Decimal {
        self.take_profit
    }

    /// Order comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// Parameters for closing (part of) an existing position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosePosition {
    position_id: PositionId,
    volume: Decimal,
}

impl ClosePosition {
    /// Create a close intent for the default volume.
    #[must_use]
    pub fn new(position_id: PositionId) -> Self {
        Self {
            position_id,
            volume: default_volume(),
        }
    }

    /// Set the volume to close. Must be strictly positive.
    pub fn with_volume(mut self, volume: Decimal) -> Result<Self, IntentError> {
        self.volume = positive_volume(volume)?;
        Ok(self)
    }

    /// Ticket of the position to close.
    #[must_use]
    pub const fn position_id(&self) -> &PositionId {
        &self.position_id
    }

    /// Volume to close.
    #[must_use]
    pub const fn volume(&self) -> Decimal {
        self.volume
    }
}

/// Kind of intent, as reported back to the webhook caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    /// Open a long position.
    Buy,
    /// Open a short position.
    Sell,
    /// Close an existing position.
    Close,
}

impl IntentKind {
    /// Lowercase name used in response envelopes.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated alert: open a position or close one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderIntent {
    /// Open a new position (buy or sell).
    Open(OpenPosition),
    /// Close an existing position.
    Close(ClosePosition),
}

impl OrderIntent {
    /// Buy / sell / close.
    #[must_use]
    pub const fn kind(&self) -> IntentKind {
        match self {
            Self::Open(open) => match open.side {
                TradeSide::Buy => IntentKind::Buy,
                TradeSide::Sell => IntentKind::Sell,
            },
            Self::Close(_) => IntentKind::Close,
        }
    }
}

fn positive_volume(volume: Decimal) -> Result<Decimal, IntentError> {
    if volume <= Decimal::ZERO {
        return Err(IntentError::invalid(
            "volume",
            format!("{volume} must be greater than zero"),
        ));
    }
    Ok(volume)
}

fn non_negative_price(field: &'static str, price: Decimal) -> Result<Decimal, IntentError> {
    if price < Decimal::ZERO {
        return Err(IntentError::invalid(
            field,
            format!("{price} cannot be negative"),
        ));
    }
    Ok(price)
}
