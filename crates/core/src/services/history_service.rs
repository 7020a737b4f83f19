use chrono::Utc;
use rust_decimal::Decimal;

use crate::models::chart::{BalancePoint, PointCategory, LABEL_NOW, LABEL_START};
use crate::models::event::CanonicalEvent;
use crate::models::trade::ClosedTrade;
use crate::models::transaction::FundTransaction;
use crate::services::event_service::EventService;

/// How far before "now" the synthetic Start anchor is placed when the
/// account has no events at all (24 hours).
const START_OFFSET_MILLIS: i64 = 86_400_000;

/// Reconstructs the account's historical balance series.
///
/// The system has ground truth only for right now: every historical NAV
/// must be derived. The walk therefore runs backwards from the live NAV,
/// subtracting known deltas — a forward walk would need a guessed opening
/// balance and would accumulate drift against the authoritative current
/// value. All accumulation is exact decimal arithmetic.
pub struct HistoryService {
    event_service: EventService,
}

impl HistoryService {
    pub fn new() -> Self {
        Self {
            event_service: EventService::new(),
        }
    }

    /// Full pipeline: normalize both raw streams, merge chronologically,
    /// reconstruct. Wall-clock "now" is captured once at the start, so a
    /// single invocation is internally time-consistent.
    ///
    /// `current_nav` of `None` (account not loaded yet) yields an empty
    /// series — the caller distinguishes "loading" from "empty" outside
    /// this core.
    pub fn reconstruct_balance_history(
        &self,
        trades: &[ClosedTrade],
        transactions: &[FundTransaction],
        current_nav: Option<Decimal>,
    ) -> Vec<BalancePoint> {
        let Some(nav) = current_nav else {
            return Vec::new();
        };
        let merged = self.event_service.merge_chronological(
            self.event_service.collect_trade_events(trades),
            self.event_service.collect_fund_events(transactions),
        );
        self.reconstruct_at(&merged, nav, Utc::now().timestamp_millis())
    }

    /// Deterministic core: given the merged ascending event sequence, the
    /// authoritative current NAV, and a fixed "now", derive the full
    /// balance series oldest-first.
    ///
    /// Walking newest → oldest, each event's nav-after is the running
    /// total carried from the more recent side; subtracting the event's
    /// amount yields the carry-in for the next older event. Identical
    /// inputs produce identical output.
    pub fn reconstruct_at(
        &self,
        events: &[CanonicalEvent],
        current_nav: Decimal,
        now_millis: i64,
    ) -> Vec<BalancePoint> {
        let mut points = Vec::with_capacity(events.len() + 2);
        let mut running_nav = current_nav;

        // Right-edge anchor: the chart must end exactly at the live NAV.
        points.push(BalancePoint {
            timestamp_millis: now_millis,
            nav_after_event: running_nav,
            event_amount: Decimal::ZERO,
            category: PointCategory::Now,
            label: LABEL_NOW.to_string(),
        });

        for event in events.iter().rev() {
            points.push(BalancePoint {
                timestamp_millis: event.timestamp_millis,
                nav_after_event: running_nav,
                event_amount: event.amount,
                category: event.category.into(),
                label: event.label.clone(),
            });
            running_nav -= event.amount;
        }

        // A lone Now point would render as a degenerate chart; give an
        // event-less account a flat 24-hour run-up instead.
        if events.is_empty() {
            points.push(BalancePoint {
                timestamp_millis: now_millis - START_OFFSET_MILLIS,
                nav_after_event: running_nav,
                event_amount: Decimal::ZERO,
                category: PointCategory::Start,
                label: LABEL_START.to_string(),
            });
        }

        // Built newest-first; flip to chronological order.
        points.reverse();
        points
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
