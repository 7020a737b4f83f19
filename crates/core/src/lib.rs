pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use models::{
    account::AccountSnapshot,
    chart::BalancePoint,
    event::CanonicalEvent,
    overview::AccountOverview,
    trade::ClosedTrade,
    transaction::FundTransaction,
};
use providers::traits::AccountProvider;
use services::{
    event_service::EventService, history_service::HistoryService,
    overview_service::OverviewService,
};

use errors::CoreError;

/// Main entry point for the Account Lens core library.
/// Holds the latest fetched account data and the services that turn it
/// into chart- and table-ready output.
#[must_use]
pub struct AccountLens {
    snapshot: Option<AccountSnapshot>,
    trades: Vec<ClosedTrade>,
    transactions: Vec<FundTransaction>,
    event_service: EventService,
    history_service: HistoryService,
    overview_service: OverviewService,
}

impl std::fmt::Debug for AccountLens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountLens")
            .field("has_snapshot", &self.snapshot.is_some())
            .field("trades", &self.trades.len())
            .field("transactions", &self.transactions.len())
            .finish()
    }
}

impl AccountLens {
    /// Create an empty lens with no account data loaded.
    pub fn new() -> Self {
        Self {
            snapshot: None,
            trades: Vec::new(),
            transactions: Vec::new(),
            event_service: EventService::new(),
            history_service: HistoryService::new(),
            overview_service: OverviewService::new(),
        }
    }

    // ── Data Loading ────────────────────────────────────────────────

    /// Fetch the account summary, closed trades, and transaction ledger
    /// from a provider.
    ///
    /// All three payloads are fetched before anything is committed: on any
    /// failure the held state is untouched and the error propagates, so the
    /// reconstruction core never sees partially refreshed inputs.
    pub async fn refresh(
        &mut self,
        provider: &dyn AccountProvider,
        account_id: &str,
    ) -> Result<(), CoreError> {
        if account_id.trim().is_empty() {
            return Err(CoreError::ValidationError("empty account id".into()));
        }

        let snapshot = provider.fetch_snapshot(account_id).await?;
        let trades = provider.fetch_closed_trades(account_id).await?;
        let transactions = provider.fetch_transactions(account_id).await?;

        self.snapshot = Some(snapshot);
        self.trades = trades;
        self.transactions = transactions;
        Ok(())
    }

    /// Inject account data directly (offline use, tests).
    pub fn set_data(
        &mut self,
        snapshot: Option<AccountSnapshot>,
        trades: Vec<ClosedTrade>,
        transactions: Vec<FundTransaction>,
    ) {
        self.snapshot = snapshot;
        self.trades = trades;
        self.transactions = transactions;
    }

    /// Drop all held account data.
    pub fn clear(&mut self) {
        self.snapshot = None;
        self.trades.clear();
        self.transactions.clear();
    }

    // ── Output ──────────────────────────────────────────────────────

    /// The latest account summary, if loaded.
    #[must_use]
    pub fn snapshot(&self) -> Option<&AccountSnapshot> {
        self.snapshot.as_ref()
    }

    /// Reconstructed equity timeline, oldest-first, anchored at the live
    /// NAV. Empty when no snapshot is loaded — the frontend treats "no
    /// data yet" as a valid rendering state, not an error.
    #[must_use]
    pub fn balance_history(&self) -> Vec<BalancePoint> {
        self.history_service.reconstruct_balance_history(
            &self.trades,
            &self.transactions,
            self.snapshot.as_ref().map(|s| s.nav),
        )
    }

    /// Canonical events newest-first, for the transaction-history table.
    #[must_use]
    pub fn ledger(&self) -> Vec<CanonicalEvent> {
        let mut merged = self.merged_events();
        merged.reverse();
        merged
    }

    /// Headline metrics for the overview panel, if a snapshot is loaded.
    #[must_use]
    pub fn overview(&self) -> Option<AccountOverview> {
        let snapshot = self.snapshot.as_ref()?;
        let merged = self.merged_events();
        Some(self.overview_service.build_overview(snapshot, &merged))
    }

    /// Number of canonical events the held data produces.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.merged_events().len()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn merged_events(&self) -> Vec<CanonicalEvent> {
        self.event_service.merge_chronological(
            self.event_service.collect_trade_events(&self.trades),
            self.event_service.collect_fund_events(&self.transactions),
        )
    }
}

impl Default for AccountLens {
    fn default() -> Self {
        Self::new()
    }
}
