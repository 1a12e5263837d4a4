//! Inbound webhook payload.
//!
//! One canonical schema with aliases for the legacy alert format:
//!
//! | Canonical     | Legacy alias |
//! |---------------|--------------|
//! | `action`      | `command`    |
//! | `stop_loss`   | `sl`         |
//! | `take_profit` | `tp`         |
//! | `position_id` | `ticket`     |
//!
//! Legacy alerts send `command: "open"` with a separate `side`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::error::WebhookError;
use crate::domain::{
    ClosePosition, IntentError, OpenPosition, OrderIntent, PositionId, Symbol, TradeSide,
};

/// Alert body as sent by the signal source.
///
/// Numeric fields accept numbers or numeric strings (`"0.01"`), so they are
/// kept as raw JSON until validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    /// `buy`, `sell`, `close`, or legacy `open`.
    #[serde(default, alias = "command")]
    pub action: Option<String>,
    /// Instrument symbol (buy / sell / open).
    #[serde(default)]
    pub symbol: Option<String>,
    /// `Buy` / `Sell`, only read for legacy `open`.
    #[serde(default)]
    pub side: Option<String>,
    /// Lots; defaults to 0.01.
    #[serde(default)]
    pub volume: Option<Value>,
    /// Stop-loss price; 0 or absent means unset.
    #[serde(default, alias = "sl")]
    pub stop_loss: Option<Value>,
    /// Take-profit price; 0 or absent means unset.
    #[serde(default, alias = "tp")]
    pub take_profit: Option<Value>,
    /// Ticket of the position to close.
    #[serde(default, alias = "ticket")]
    pub position_id: Option<Value>,
    /// Order comment.
    #[serde(default)]
    pub comment: Option<String>,
}

/// Discriminator values understood by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    /// Open a long position.
    Buy,
    /// Open a short position.
    Sell,
    /// Legacy open; direction comes from `side`.
    Open,
    /// Close a position.
    Close,
}

impl AlertAction {
    /// Parse an action case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            "open" => Some(Self::Open),
            "close" => Some(Self::Close),
            _ => None,
        }
    }
}

impl WebhookPayload {
    /// Parse a raw request body.
    pub fn from_body(body: &[u8]) -> Result<Self, WebhookError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(WebhookError::EmptyBody);
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| WebhookError::MalformedJson(e.to_string()))?;

        match &value {
            Value::Object(map) if map.is_empty() => return Err(WebhookError::EmptyBody),
            Value::Object(_) => {}
            Value::Null => return Err(WebhookError::EmptyBody),
            _ => {
                return Err(WebhookError::InvalidPayload(
                    "expected a JSON object".to_string(),
                ));
            }
        }

        tracing::info!(payload = %value, "Webhook received");

        serde_json::from_value(value).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
    }

    /// Validate the payload and map it onto an [`OrderIntent`].
    pub fn into_intent(self) -> Result<OrderIntent, WebhookError> {
        let raw_action = self
            .action
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(WebhookError::MissingAction)?;

        let action = AlertAction::parse(raw_action)
            .ok_or_else(|| WebhookError::UnknownAction(raw_action.to_string()))?;

        let intent = match action {
            AlertAction::Buy => self.open_intent(TradeSide::Buy)?,
            AlertAction::Sell => self.open_intent(TradeSide::Sell)?,
            AlertAction::Open => {
                let side = TradeSide::parse(self.side.as_deref().unwrap_or_default())?;
                self.open_intent(side)?
            }
            AlertAction::Close => self.close_intent()?,
        };
        Ok(intent)
    }

    fn open_intent(&self, side: TradeSide) -> Result<OrderIntent, IntentError> {
        let symbol = Symbol::parse(self.symbol.as_deref().unwrap_or_default())?;
        let mut open = OpenPosition::new(symbol, side);

        if let Some(volume) = decimal_field("volume", self.volume.as_ref())? {
            open = open.with_volume(volume)?;
        }
        if let Some(stop_loss) = decimal_field("stop_loss", self.stop_loss.as_ref())? {
            open = open.with_stop_loss(stop_loss)?;
        }
        if let Some(take_profit) = decimal_field("take_profit", self.take_profit.as_ref())? {
            open = open.with_take_profit(take_profit)?;
        }
        if let Some(comment) = &self.comment {
            open = open.with_comment(comment);
        }

        Ok(OrderIntent::Open(open))
    }

    fn close_intent(&self) -> Result<OrderIntent, IntentError> {
        let position_id =
            PositionId::from_json(self.position_id.as_ref().unwrap_or(&Value::Null))?;
        let mut close = ClosePosition::new(position_id);

        if let Some(volume) = decimal_field("volume", self.volume.as_ref())? {
            close = close.with_volume(volume)?;
        }

        Ok(OrderIntent::Close(close))
    }
}

/// Read an optional decimal sent as a JSON number or numeric string.
///
/// Absent, `null` and blank strings yield `None` so the caller's default applies.
fn decimal_field(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<Decimal>, IntentError> {
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(IntentError::invalid(
                field,
                format!("expected a number, got {other}"),
            ));
        }
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|_| IntentError::invalid(field, format!("{text} is not a number")))
}
