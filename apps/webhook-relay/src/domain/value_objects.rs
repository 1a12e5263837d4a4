//! Value objects shared by the alert intents.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::IntentError;

/// Volume used when an alert does not specify one (one micro lot).
#[must_use]
pub fn default_volume() -> Decimal {
    Decimal::new(1, 2)
}

/// Brokerage instrument symbol, e.g. `EURUSD_1` or `SILVER`.
///
/// Kept exactly as the alert sent it apart from surrounding whitespace:
/// CapitalCore symbols are case-sensitive and may carry suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Parse a symbol, rejecting empty values.
    pub fn parse(value: &str) -> Result<Self, IntentError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IntentError::MissingField { field: "symbol" });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    /// Long.
    Buy,
    /// Short.
    Sell,
}

impl TradeSide {
    /// Parse a side case-insensitively (`buy`, `Buy`, `SELL`, ...).
    pub fn parse(value: &str) -> Result<Self, IntentError> {
        match value.trim().to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            "" => Err(IntentError::MissingField { field: "side" }),
            other => Err(IntentError::invalid(
                "side",
                format!("{other}. Use 'Buy' or 'Sell'"),
            )),
        }
    }

    /// Wire name expected by the brokerage `type` field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brokerage ticket of an open position.
///
/// Alerts send either a string or an integer; the brokerage receives the
/// value back in the same JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionId {
    /// Numeric ticket, e.g. `446148`.
    Number(u64),
    /// Textual ticket, e.g. `"446148"`.
    Text(String),
}

impl PositionId {
    /// Build a position id from a raw JSON value.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, IntentError> {
        match value {
            serde_json::Value::String(s) if s.trim().is_empty() => {
                Err(IntentError::MissingField {
                    field: "position_id",
                })
            }
            serde_json::Value::String(s) => Ok(Self::Text(s.trim().to_string())),
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(0) => Err(IntentError::MissingField {
                    field: "position_id",
                }),
                Some(id) => Ok(Self::Number(id)),
                None => Err(IntentError::invalid(
                    "position_id",
                    format!("{n} is not a valid ticket"),
                )),
            },
            serde_json::Value::Null => Err(IntentError::MissingField {
                field: "position_id",
            }),
            other => Err(IntentError::invalid(
                "position_id",
                format!("expected string or integer, got {other}"),
            )),
        }
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_volume_is_one_micro_lot() {
        assert_eq!(default_volume().to_string(), "0.01");
    }

    #[test]
    fn symbol_keeps_case_and_suffix() {
        let symbol = Symbol::parse("  EURUSD_1 ").unwrap();
        assert_eq!(symbol.as_str(), "EURUSD_1");
    }

    #[test]
    fn symbol_rejects_blank() {
        assert_eq!(
            Symbol::parse("   "),
            Err(IntentError::MissingField { field: "symbol" })
        );
    }

    #[test]
    fn trade_side_parses_any_case() {
        assert_eq!(TradeSide::parse("buy").unwrap(), TradeSide::Buy);
        assert_eq!(TradeSide::parse("Buy").unwrap(), TradeSide::Buy);
        assert_eq!(TradeSide::parse("SELL").unwrap(), TradeSide::Sell);
    }

    #[test]
    fn trade_side_rejects_unknown() {
        let err = TradeSide::parse("hold").unwrap_err();
        assert!(err.to_string().contains("hold"));
    }

    #[test]
    fn trade_side_wire_names() {
        assert_eq!(TradeSide::Buy.as_str(), "Buy");
        assert_eq!(TradeSide::Sell.to_string(), "Sell");
    }

    #[test]
    fn position_id_keeps_json_form() {
        let text = PositionId::from_json(&json!("446148")).unwrap();
        assert_eq!(serde_json::to_value(&text).unwrap(), json!("446148"));

        let number = PositionId::from_json(&json!(446_148)).unwrap();
        assert_eq!(serde_json::to_value(&number).unwrap(), json!(446_148));
    }

    #[test]
    fn position_id_treats_empty_and_zero_as_missing() {
        for value in [json!(""), json!(0), json!(null)] {
            assert_eq!(
                PositionId::from_json(&value),
                Err(IntentError::MissingField {
                    field: "position_id"
                })
            );
        }
    }

    #[test]
    fn position_id_rejects_other_types() {
        assert!(matches!(
            PositionId::from_json(&json!(true)),
            Err(IntentError::InvalidField { .. })
        ));
        assert!(matches!(
            PositionId::from_json(&json!(-5)),
            Err(IntentError::InvalidField { .. })
        ));
    }
}
