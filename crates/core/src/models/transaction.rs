use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de;

/// Ledger entry vocabulary from the broker's transaction log.
///
/// Deposits and withdrawals both arrive as `TRANSFER_FUNDS` and are told
/// apart by the sign of the amount, not by the kind tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundKind {
    /// Account creation
    #[serde(rename = "CREATE")]
    Create,
    /// Client-initiated funds transfer (deposit or withdrawal by sign)
    #[serde(rename = "TRANSFER_FUNDS")]
    Transfer,
    /// A transfer the broker rejected
    #[serde(rename = "TRANSFER_FUNDS_REJECT")]
    TransferRejected,
    /// Daily financing charge/credit
    #[serde(rename = "DAILY_FINANCING")]
    Financing,
    /// Resettable P&L reset marker
    #[serde(rename = "RESET_RESETTABLE_PL")]
    BalanceReset,
    /// Anything this library does not recognize
    #[default]
    #[serde(other)]
    Other,
}

/// A ledger entry from the account's transaction log.
///
/// All fields are deserialized defensively: brokers mix numbers and numeric
/// strings freely, and a malformed row must not fail the whole payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundTransaction {
    /// Broker-assigned transaction ID
    #[serde(default)]
    pub id: String,

    /// When the entry was booked. `None` when unparseable; such records
    /// do not contribute a history point.
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub time: Option<DateTime<Utc>>,

    /// Signed amount moved into (+) or out of (−) the account.
    /// Absent or non-numeric → treated as zero.
    #[serde(default, deserialize_with = "de::flexible_amount")]
    pub amount: Option<Decimal>,

    /// Ledger entry kind
    #[serde(default, rename = "type")]
    pub kind: FundKind,
}

impl FundTransaction {
    /// Build a transaction directly (offline import, tests).
    pub fn new(
        id: impl Into<String>,
        time: DateTime<Utc>,
        amount: Decimal,
        kind: FundKind,
    ) -> Self {
        Self {
            id: id.into(),
            time: Some(time),
            amount: Some(amount),
            kind,
        }
    }
}
