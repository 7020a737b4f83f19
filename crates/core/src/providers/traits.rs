use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::account::AccountSnapshot;
use crate::models::trade::ClosedTrade;
use crate::models::transaction::FundTransaction;

/// Trait abstraction for account data sources (SOLID: Dependency Inversion).
///
/// Each brokerage API implements this trait. If an API changes or a second
/// broker is added, only the implementation is swapped — the rest of the
/// codebase is untouched. A provider either delivers a complete payload or
/// fails the whole fetch; the reconstruction core never sees partial data.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AccountProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Current account summary: NAV, balance, margin figures.
    async fn fetch_snapshot(&self, account_id: &str) -> Result<AccountSnapshot, CoreError>;

    /// All closed trades for the account, in any order.
    async fn fetch_closed_trades(&self, account_id: &str) -> Result<Vec<ClosedTrade>, CoreError>;

    /// The account's full transaction ledger, in any order.
    async fn fetch_transactions(&self, account_id: &str)
        -> Result<Vec<FundTransaction>, CoreError>;
}
