use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Margin-health display banding, derived from margin utilization
/// (margin used as a percentage of NAV).
///
/// Thresholds: below 50% `Healthy`, below 80% `Stressed`, otherwise
/// `Critical`. An account with margin in use but no positive NAV is
/// always `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginHealth {
    Healthy,
    Stressed,
    Critical,
}

impl std::fmt::Display for MarginHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarginHealth::Healthy => write!(f, "Healthy"),
            MarginHealth::Stressed => write!(f, "Stressed"),
            MarginHealth::Critical => write!(f, "Critical"),
        }
    }
}

/// Headline metrics for the account overview panel.
///
/// Combines the raw snapshot with derived margin figures and ledger
/// aggregates. The core computes all the numbers — the frontend only
/// renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountOverview {
    /// Net asset value
    pub nav: Decimal,

    /// Settled cash balance
    pub balance: Decimal,

    /// Unrealized P&L across open positions
    pub unrealized_pl: Decimal,

    /// Margin currently locked
    pub margin_used: Decimal,

    /// NAV minus margin used
    pub margin_available: Decimal,

    /// Account margin rate
    pub margin_rate: Decimal,

    /// Margin used as a percentage of NAV. `None` when NAV is not positive.
    pub margin_utilization_pct: Option<Decimal>,

    /// Health banding derived from utilization
    pub margin_health: MarginHealth,

    /// Total notional value of open positions
    pub position_value: Decimal,

    /// Number of open trades
    pub open_trade_count: u32,

    /// Number of pending orders
    pub pending_order_count: u32,

    /// Sum of deposit event amounts (non-negative)
    pub deposits_total: Decimal,

    /// Sum of withdrawal event amounts (non-positive, as booked)
    pub withdrawals_total: Decimal,

    /// Sum of realized P&L across all closed trades
    pub realized_pl_total: Decimal,

    /// Total canonical events contributing to the history
    pub event_count: usize,
}
