use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time account state from the broker's summary endpoint.
///
/// Monetary fields arrive as decimal strings on the wire;
/// `rust_decimal`'s serde support accepts both strings and numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Net asset value: balance plus unrealized P&L. The authoritative
    /// anchor for history reconstruction.
    #[serde(default, rename = "NAV")]
    pub nav: Decimal,

    /// Settled cash balance
    #[serde(default)]
    pub balance: Decimal,

    /// Unrealized P&L across open positions
    #[serde(default, rename = "unrealizedPL")]
    pub unrealized_pl: Decimal,

    /// Margin currently locked by open positions
    #[serde(default, rename = "marginUsed")]
    pub margin_used: Decimal,

    /// Account margin rate (e.g., 0.02 for 50:1 leverage)
    #[serde(default, rename = "marginRate")]
    pub margin_rate: Decimal,

    /// Total notional value of open positions
    #[serde(default, rename = "positionValue")]
    pub position_value: Decimal,

    /// Number of open trades
    #[serde(default, rename = "openTradeCount")]
    pub open_trade_count: u32,

    /// Number of pending orders
    #[serde(default, rename = "pendingOrderCount")]
    pub pending_order_count: u32,
}
