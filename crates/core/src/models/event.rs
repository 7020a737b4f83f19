use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display label for realized trade P&L events.
pub const LABEL_TRADE: &str = "Trade P&L";
/// Display label for account-creation events.
pub const LABEL_CREATE: &str = "Account Opened";
/// Display label for deposit events.
pub const LABEL_DEPOSIT: &str = "Deposit";
/// Display label for withdrawal events.
pub const LABEL_WITHDRAWAL: &str = "Withdrawal";

/// Category of a canonical event.
///
/// A pure function of (source, sign): trade events are always `Trade`;
/// fund events are `Create` when the source denotes account creation,
/// else `Deposit` for non-negative amounts and `Withdrawal` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    /// Realized P&L from a closed position
    Trade,
    /// Funds moved into the account
    Deposit,
    /// Funds moved out of the account
    Withdrawal,
    /// Account creation
    Create,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Trade => write!(f, "Trade"),
            EventCategory::Deposit => write!(f, "Deposit"),
            EventCategory::Withdrawal => write!(f, "Withdrawal"),
            EventCategory::Create => write!(f, "Create"),
        }
    }
}

/// The normalized event both raw input streams reduce to.
///
/// Everything downstream of the collector operates only on this closed
/// type — no runtime inspection of heterogeneous broker records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Event time in epoch milliseconds
    pub timestamp_millis: i64,

    /// Signed amount the event moved the balance by
    pub amount: Decimal,

    /// Derived category
    pub category: EventCategory,

    /// Human-readable label for tooltips and the history table
    pub label: String,
}

impl CanonicalEvent {
    pub fn new(
        timestamp_millis: i64,
        amount: Decimal,
        category: EventCategory,
        label: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_millis,
            amount,
            category,
            label: label.into(),
        }
    }
}
