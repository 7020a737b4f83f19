use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::account::AccountSnapshot;
use crate::models::event::{CanonicalEvent, EventCategory};
use crate::models::overview::{AccountOverview, MarginHealth};

/// Computes the derived metrics for the account overview panel:
/// margin figures, health banding, and ledger aggregates.
pub struct OverviewService;

impl OverviewService {
    pub fn new() -> Self {
        Self
    }

    /// Build the overview from the snapshot and the merged canonical
    /// event sequence. Pure.
    pub fn build_overview(
        &self,
        snapshot: &AccountSnapshot,
        events: &[CanonicalEvent],
    ) -> AccountOverview {
        let margin_available = snapshot.nav - snapshot.margin_used;

        let margin_utilization_pct = if snapshot.nav > Decimal::ZERO {
            Some(snapshot.margin_used / snapshot.nav * dec!(100))
        } else {
            None
        };

        let margin_health = match margin_utilization_pct {
            Some(pct) if pct < dec!(50) => MarginHealth::Healthy,
            Some(pct) if pct < dec!(80) => MarginHealth::Stressed,
            Some(_) => MarginHealth::Critical,
            // No positive NAV: critical if any margin is locked
            None if snapshot.margin_used > Decimal::ZERO => MarginHealth::Critical,
            None => MarginHealth::Healthy,
        };

        let mut deposits_total = Decimal::ZERO;
        let mut withdrawals_total = Decimal::ZERO;
        let mut realized_pl_total = Decimal::ZERO;

        for event in events {
            match event.category {
                EventCategory::Deposit => deposits_total += event.amount,
                EventCategory::Withdrawal => withdrawals_total += event.amount,
                EventCategory::Trade => realized_pl_total += event.amount,
                EventCategory::Create => {}
            }
        }

        AccountOverview {
            nav: snapshot.nav,
            balance: snapshot.balance,
            unrealized_pl: snapshot.unrealized_pl,
            margin_used: snapshot.margin_used,
            margin_available,
            margin_rate: snapshot.margin_rate,
            margin_utilization_pct,
            margin_health,
            position_value: snapshot.position_value,
            open_trade_count: snapshot.open_trade_count,
            pending_order_count: snapshot.pending_order_count,
            deposits_total,
            withdrawals_total,
            realized_pl_total,
            event_count: events.len(),
        }
    }
}

impl Default for OverviewService {
    fn default() -> Self {
        Self::new()
    }
}
