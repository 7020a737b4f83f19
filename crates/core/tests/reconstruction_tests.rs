// ═══════════════════════════════════════════════════════════════════
// HistoryService — backward balance reconstruction invariants
// ═══════════════════════════════════════════════════════════════════

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use account_lens_core::models::chart::{BalancePoint, PointCategory};
use account_lens_core::models::event::{CanonicalEvent, EventCategory};
use account_lens_core::models::trade::ClosedTrade;
use account_lens_core::models::transaction::{FundKind, FundTransaction};
use account_lens_core::services::event_service::EventService;
use account_lens_core::services::history_service::HistoryService;

const NOW: i64 = 2_000_000;

fn event(timestamp_millis: i64, amount: Decimal, category: EventCategory) -> CanonicalEvent {
    CanonicalEvent::new(timestamp_millis, amount, category, category.to_string())
}

fn assert_backward_consistent(points: &[BalancePoint]) {
    for pair in points.windows(2) {
        assert_eq!(
            pair[0].nav_after_event,
            pair[1].nav_after_event - pair[1].event_amount,
            "backward consistency violated between {:?} and {:?}",
            pair[0],
            pair[1],
        );
    }
}

// ── Invariants ──────────────────────────────────────────────────────

#[test]
fn last_point_equals_current_nav_exactly() {
    let svc = HistoryService::new();
    let events = vec![
        event(1000, dec!(200), EventCategory::Deposit),
        event(2000, dec!(-50.13), EventCategory::Withdrawal),
        event(3000, dec!(0.000001), EventCategory::Trade),
    ];
    let points = svc.reconstruct_at(&events, dec!(149.870001), NOW);
    let last = points.last().unwrap();
    assert_eq!(last.category, PointCategory::Now);
    assert_eq!(last.nav_after_event, dec!(149.870001));
}

#[test]
fn adjacent_points_are_backward_consistent() {
    let svc = HistoryService::new();
    let events = vec![
        event(100, dec!(1000), EventCategory::Create),
        event(200, dec!(-37.5), EventCategory::Trade),
        event(300, dec!(500), EventCategory::Deposit),
        event(400, dec!(-250), EventCategory::Withdrawal),
        event(500, dec!(12.34), EventCategory::Trade),
    ];
    let points = svc.reconstruct_at(&events, dec!(1224.84), NOW);
    assert_eq!(points.len(), 6);
    assert_backward_consistent(&points);
}

#[test]
fn timestamps_are_non_decreasing() {
    let svc = HistoryService::new();
    let events = vec![
        event(100, dec!(1), EventCategory::Deposit),
        event(100, dec!(2), EventCategory::Deposit),
        event(900, dec!(3), EventCategory::Trade),
    ];
    let points = svc.reconstruct_at(&events, dec!(6), NOW);
    for pair in points.windows(2) {
        assert!(pair[0].timestamp_millis <= pair[1].timestamp_millis);
    }
}

#[test]
fn equal_timestamp_events_keep_relative_order() {
    let svc = HistoryService::new();
    let events = vec![
        event(100, dec!(1), EventCategory::Deposit),
        event(100, dec!(2), EventCategory::Trade),
    ];
    let points = svc.reconstruct_at(&events, dec!(3), NOW);
    assert_eq!(points[0].event_amount, dec!(1));
    assert_eq!(points[1].event_amount, dec!(2));
}

// ── Empty input ─────────────────────────────────────────────────────

#[test]
fn empty_events_yield_start_and_now() {
    let svc = HistoryService::new();
    let points = svc.reconstruct_at(&[], dec!(1000), NOW);

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].category, PointCategory::Start);
    assert_eq!(points[0].timestamp_millis, NOW - 86_400_000);
    assert_eq!(points[0].nav_after_event, dec!(1000));
    assert_eq!(points[0].event_amount, Decimal::ZERO);

    assert_eq!(points[1].category, PointCategory::Now);
    assert_eq!(points[1].timestamp_millis, NOW);
    assert_eq!(points[1].nav_after_event, dec!(1000));
}

#[test]
fn missing_nav_yields_empty_series() {
    let svc = HistoryService::new();
    let trades = vec![ClosedTrade::closed("1", "EUR_USD", 1000, dec!(50))];
    let points = svc.reconstruct_balance_history(&trades, &[], None);
    assert!(points.is_empty());
}

// ── Concrete scenario ───────────────────────────────────────────────

#[test]
fn reconstructs_trade_and_create_history() {
    // Trade closed at t=1000s with +50 P&L; account created at t=2s with
    // 200 initial funding; live NAV 300. Working backward from 300:
    // trade nav-after = 300 (carry 250), create nav-after = 250 (carry 50).
    let event_svc = EventService::new();
    let history_svc = HistoryService::new();

    let trades = vec![ClosedTrade::closed("1", "EUR_USD", 1000, dec!(50))];
    let transactions = vec![FundTransaction::new(
        "2",
        Utc.timestamp_millis_opt(2000).unwrap(),
        dec!(200),
        FundKind::Create,
    )];

    let merged = event_svc.merge_chronological(
        event_svc.collect_trade_events(&trades),
        event_svc.collect_fund_events(&transactions),
    );
    let points = history_svc.reconstruct_at(&merged, dec!(300), NOW);

    assert_eq!(points.len(), 3);

    assert_eq!(points[0].category, PointCategory::Create);
    assert_eq!(points[0].timestamp_millis, 2000);
    assert_eq!(points[0].nav_after_event, dec!(250));
    assert_eq!(points[0].event_amount, dec!(200));
    assert_eq!(points[0].label, "Account Opened");

    assert_eq!(points[1].category, PointCategory::Trade);
    assert_eq!(points[1].timestamp_millis, 1_000_000);
    assert_eq!(points[1].nav_after_event, dec!(300));
    assert_eq!(points[1].event_amount, dec!(50));

    assert_eq!(points[2].category, PointCategory::Now);
    assert_eq!(points[2].timestamp_millis, NOW);
    assert_eq!(points[2].nav_after_event, dec!(300));

    assert_backward_consistent(&points);
}

// ── Edge cases ──────────────────────────────────────────────────────

#[test]
fn zero_amount_event_still_emits_a_point() {
    let svc = HistoryService::new();
    let events = vec![event(500, Decimal::ZERO, EventCategory::Deposit)];
    let points = svc.reconstruct_at(&events, dec!(100), NOW);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].nav_after_event, dec!(100));
    assert_eq!(points[0].event_amount, Decimal::ZERO);
}

#[test]
fn single_event_series_has_no_start_anchor() {
    let svc = HistoryService::new();
    let events = vec![event(500, dec!(10), EventCategory::Deposit)];
    let points = svc.reconstruct_at(&events, dec!(100), NOW);
    assert!(points.iter().all(|p| p.category != PointCategory::Start));
}

#[test]
fn event_after_now_keeps_ordering_without_clamping() {
    // Impossible by construction upstream, but the reconstructor does not
    // validate timestamp bounds.
    let svc = HistoryService::new();
    let events = vec![event(NOW + 5000, dec!(10), EventCategory::Deposit)];
    let points = svc.reconstruct_at(&events, dec!(100), NOW);
    // The event stays in sequence position; the Now anchor remains the
    // last point and still carries the live NAV.
    assert_eq!(points[0].category, PointCategory::Deposit);
    assert_eq!(points[0].timestamp_millis, NOW + 5000);
    assert_eq!(points[1].category, PointCategory::Now);
    assert_eq!(points[1].nav_after_event, dec!(100));
    assert_backward_consistent(&points);
}

#[test]
fn negative_nav_reconstruction_is_exact() {
    let svc = HistoryService::new();
    let events = vec![event(100, dec!(-500), EventCategory::Withdrawal)];
    let points = svc.reconstruct_at(&events, dec!(-200), NOW);
    // Before the withdrawal the account held 300
    assert_eq!(points[0].nav_after_event, dec!(-200));
    assert_eq!(points[1].nav_after_event, dec!(-200));
    assert_eq!(
        points[0].nav_after_event - points[0].event_amount,
        dec!(300)
    );
}

#[test]
fn accumulation_does_not_drift_over_many_events() {
    // 10_000 events of 0.01 each must sum back exactly — decimal
    // arithmetic, no float rounding.
    let svc = HistoryService::new();
    let events: Vec<CanonicalEvent> = (0..10_000)
        .map(|i| event(i, dec!(0.01), EventCategory::Trade))
        .collect();
    let points = svc.reconstruct_at(&events, dec!(100), NOW);
    assert_eq!(points.first().unwrap().nav_after_event, dec!(0.01));
    assert_eq!(points.last().unwrap().nav_after_event, dec!(100));
    assert_backward_consistent(&points);
}

// ── Idempotence ─────────────────────────────────────────────────────

#[test]
fn identical_inputs_produce_identical_output() {
    let svc = HistoryService::new();
    let events = vec![
        event(100, dec!(1000), EventCategory::Create),
        event(200, dec!(-37.5), EventCategory::Trade),
        event(300, dec!(500), EventCategory::Deposit),
    ];
    let a = svc.reconstruct_at(&events, dec!(1462.5), NOW);
    let b = svc.reconstruct_at(&events, dec!(1462.5), NOW);
    assert_eq!(a, b);
}

#[test]
fn reconstruction_does_not_mutate_inputs() {
    let svc = HistoryService::new();
    let events = vec![
        event(100, dec!(5), EventCategory::Deposit),
        event(200, dec!(7), EventCategory::Trade),
    ];
    let before = events.clone();
    let _ = svc.reconstruct_at(&events, dec!(12), NOW);
    assert_eq!(events, before);
}
