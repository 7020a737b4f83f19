use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::event::EventCategory;

/// Display label for the synthetic right-edge anchor.
pub const LABEL_NOW: &str = "Now";
/// Display label for the synthetic left-edge anchor on empty histories.
pub const LABEL_START: &str = "Start";

/// Category attached to a reconstructed balance point.
///
/// Extends the canonical event categories with the two synthetic anchors
/// the chart needs: `Now` pins the right edge to the live NAV, `Start`
/// gives an event-less account a flat 24-hour run-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointCategory {
    Trade,
    Deposit,
    Withdrawal,
    Create,
    /// Synthetic right-edge anchor at the live NAV
    Now,
    /// Synthetic left-edge anchor for empty histories
    Start,
}

impl From<EventCategory> for PointCategory {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Trade => PointCategory::Trade,
            EventCategory::Deposit => PointCategory::Deposit,
            EventCategory::Withdrawal => PointCategory::Withdrawal,
            EventCategory::Create => PointCategory::Create,
        }
    }
}

/// A single reconstructed balance point.
///
/// The core generates these — the frontend just renders them. Points come
/// out oldest-first; the last point's NAV equals the live account NAV
/// exactly, and every adjacent pair satisfies
/// `p[i].nav_after_event == p[i+1].nav_after_event - p[i+1].event_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// Event time in epoch milliseconds
    pub timestamp_millis: i64,

    /// Account NAV immediately after this event took effect
    pub nav_after_event: Decimal,

    /// Signed amount the event moved the balance by. Zero for anchors.
    pub event_amount: Decimal,

    /// Event category (canonical or synthetic anchor)
    pub category: PointCategory,

    /// Human-readable label for tooltips
    pub label: String,
}

impl BalancePoint {
    /// Sparse-overlay series value: the event amount when this point's
    /// category matches, absent otherwise. The renderer builds its
    /// deposit/withdrawal/creation marker series from this.
    #[must_use]
    pub fn marker_amount(&self, category: PointCategory) -> Option<Decimal> {
        if self.category == category {
            Some(self.event_amount)
        } else {
            None
        }
    }

    /// Amount shown in the tooltip. Absent for the synthetic anchors,
    /// which carry no event of their own.
    #[must_use]
    pub fn tooltip_amount(&self) -> Option<Decimal> {
        if self.is_anchor() {
            None
        } else {
            Some(self.event_amount)
        }
    }

    /// `true` for the synthetic `Now`/`Start` points.
    #[must_use]
    pub fn is_anchor(&self) -> bool {
        matches!(self.category, PointCategory::Now | PointCategory::Start)
    }
}
