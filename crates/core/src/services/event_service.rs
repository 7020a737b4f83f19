use rust_decimal::Decimal;
use tracing::warn;

use crate::models::event::{
    CanonicalEvent, EventCategory, LABEL_CREATE, LABEL_DEPOSIT, LABEL_TRADE, LABEL_WITHDRAWAL,
};
use crate::models::trade::{ClosedTrade, TradeState};
use crate::models::transaction::{FundKind, FundTransaction};

/// Normalizes the two heterogeneous raw input streams into canonical
/// events and merges them into one chronological sequence.
///
/// Malformed individual records are skipped or zero-coerced, never
/// errors: one bad history row must not blank the whole chart.
pub struct EventService;

impl EventService {
    pub fn new() -> Self {
        Self
    }

    /// Closed trades → canonical `Trade` events.
    ///
    /// Open positions and records without a close timestamp are skipped.
    /// Close times arrive in epoch seconds and are converted to
    /// milliseconds; absent realized P&L counts as zero.
    pub fn collect_trade_events(&self, trades: &[ClosedTrade]) -> Vec<CanonicalEvent> {
        trades
            .iter()
            .filter_map(|trade| {
                if trade.state == TradeState::Open {
                    return None;
                }
                let Some(close_seconds) = trade.close_timestamp else {
                    warn!(trade_id = %trade.id, "skipping closed trade without close timestamp");
                    return None;
                };
                // Saturating: a garbage epoch that survived parsing must
                // not panic the collector.
                Some(CanonicalEvent::new(
                    close_seconds.saturating_mul(1000),
                    trade.realized_pl.unwrap_or_default(),
                    EventCategory::Trade,
                    LABEL_TRADE,
                ))
            })
            .collect()
    }

    /// Fund transactions → canonical fund events.
    ///
    /// Account creation maps to `Create` regardless of amount; every other
    /// kind splits into `Deposit`/`Withdrawal` by the sign of the amount.
    /// Records with unparseable time are skipped; absent amounts count
    /// as zero (and zero is a deposit by the sign rule).
    pub fn collect_fund_events(&self, transactions: &[FundTransaction]) -> Vec<CanonicalEvent> {
        transactions
            .iter()
            .filter_map(|tx| {
                let Some(time) = tx.time else {
                    warn!(transaction_id = %tx.id, "skipping fund transaction without parseable time");
                    return None;
                };
                let amount = tx.amount.unwrap_or_default();
                let (category, label) = match tx.kind {
                    FundKind::Create => (EventCategory::Create, LABEL_CREATE),
                    _ if amount >= Decimal::ZERO => (EventCategory::Deposit, LABEL_DEPOSIT),
                    _ => (EventCategory::Withdrawal, LABEL_WITHDRAWAL),
                };
                Some(CanonicalEvent::new(
                    time.timestamp_millis(),
                    amount,
                    category,
                    label,
                ))
            })
            .collect()
    }

    /// Concatenate both event lists (trades first) and sort ascending by
    /// timestamp. The sort is stable: events at the identical millisecond
    /// keep their relative input order, which keeps reconstruction
    /// reproducible.
    pub fn merge_chronological(
        &self,
        trade_events: Vec<CanonicalEvent>,
        fund_events: Vec<CanonicalEvent>,
    ) -> Vec<CanonicalEvent> {
        let mut merged = trade_events;
        merged.extend(fund_events);
        merged.sort_by_key(|e| e.timestamp_millis);
        merged
    }
}

impl Default for EventService {
    fn default() -> Self {
        Self::new()
    }
}
