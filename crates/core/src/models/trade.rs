use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de;

/// Lifecycle state of a position as reported by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeState {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "CLOSED")]
    Closed,
    #[serde(rename = "CLOSE_WHEN_TRADEABLE")]
    CloseWhenTradeable,
}

impl std::fmt::Display for TradeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeState::Open => write!(f, "Open"),
            TradeState::Closed => write!(f, "Closed"),
            TradeState::CloseWhenTradeable => write!(f, "CloseWhenTradeable"),
        }
    }
}

/// A position record from the broker's trade endpoint.
///
/// Only closed trades with a known close time contribute to the
/// reconstructed history; everything else is skipped at collection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedTrade {
    /// Broker-assigned trade ID
    #[serde(default)]
    pub id: String,

    /// Traded instrument (e.g., "EUR_USD")
    #[serde(default)]
    pub instrument: String,

    /// Open, Closed, or pending close
    pub state: TradeState,

    /// Close time in epoch seconds. Absent for open positions or when the
    /// broker omits it; such records do not contribute a history point.
    #[serde(
        default,
        rename = "closeTime",
        deserialize_with = "de::flexible_epoch_seconds"
    )]
    pub close_timestamp: Option<i64>,

    /// Realized profit/loss locked in at close. Absent → treated as zero.
    #[serde(
        default,
        rename = "realizedPL",
        deserialize_with = "de::flexible_amount"
    )]
    pub realized_pl: Option<Decimal>,
}

impl ClosedTrade {
    /// Build a closed trade directly (offline import, tests).
    pub fn closed(
        id: impl Into<String>,
        instrument: impl Into<String>,
        close_timestamp: i64,
        realized_pl: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            instrument: instrument.into(),
            state: TradeState::Closed,
            close_timestamp: Some(close_timestamp),
            realized_pl: Some(realized_pl),
        }
    }
}
