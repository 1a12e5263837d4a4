//! CapitalCore API request types.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};

use crate::domain::{ClosePosition, OpenPosition, PositionId, TradeSide};

/// Body of `POST .../trade/open-order`.
#[derive(Debug, Clone, Serialize)]
pub struct OpenOrderRequest<'a> {
    /// Instrument symbol.
    pub symbol: &'a str,
    /// `"Buy"` or `"Sell"`.
    #[serde(rename = "type")]
    pub side: TradeSide,
    /// Lots.
    #[serde(serialize_with = "serialize_number")]
    pub volume: Decimal,
    /// Stop-loss price, `0` when unset.
    #[serde(serialize_with = "serialize_number")]
    pub stop_loss: Decimal,
    /// Take-profit price, `0` when unset.
    #[serde(serialize_with = "serialize_number")]
    pub take_profit: Decimal,
    /// Free-form order comment.
    pub comment: &'a str,
}

impl<'a> From<&'a OpenPosition> for OpenOrderRequest<'a> {
    fn from(open: &'a OpenPosition) -> Self {
        Self {
            symbol: open.symbol().as_str(),
            side: open.side(),
            volume: open.volume(),
            stop_loss: open.stop_loss(),
            take_profit: open.take_profit(),
            comment: open.comment(),
        }
    }
}

/// Body of `POST .../trade/close-many-positions`.
#[derive(Debug, Clone, Serialize)]
pub struct ClosePositionsRequest<'a> {
    /// Positions to close. The relay always sends exactly one.
    pub positions: Vec<ClosePositionEntry<'a>>,
}

/// One entry of [`ClosePositionsRequest::positions`].
#[derive(Debug, Clone, Serialize)]
pub struct ClosePositionEntry<'a> {
    /// Position ticket, in the JSON form the alert used.
    pub ticket: &'a PositionId,
    /// Lots to close.
    #[serde(serialize_with = "serialize_number")]
    pub volume: Decimal,
}

impl<'a> From<&'a ClosePosition> for ClosePositionsRequest<'a> {
    fn from(close: &'a ClosePosition) -> Self {
        Self {
            positions: vec![ClosePositionEntry {
                ticket: close.position_id(),
                volume: close.volume(),
            }],
        }
    }
}

/// Write a decimal as a JSON number: integral values as integers (`0`),
/// everything else as a float (`0.01`).
#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_number<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let normalized = value.normalize();
    if normalized.scale() == 0
        && let Some(integer) = normalized.to_i64()
    {
        return serializer.serialize_i64(integer);
    }
    // Parsing the decimal text yields the float nearest to the written value.
    match normalized.to_string().parse::<f64>() {
        Ok(float) if float.is_finite() => serializer.serialize_f64(float),
        _ => Err(serde::ser::Error::custom(format!(
            "{value} cannot be represented as a JSON number"
        ))),
    }
}
