use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use super::traits::AccountProvider;
use crate::errors::CoreError;
use crate::models::account::AccountSnapshot;
use crate::models::trade::ClosedTrade;
use crate::models::transaction::FundTransaction;

const LIVE_BASE_URL: &str = "https://api-fxtrade.oanda.com/v3";
const PRACTICE_BASE_URL: &str = "https://api-fxpractice.oanda.com/v3";

/// OANDA v20 REST provider.
///
/// - **Auth**: personal access token, sent as a bearer header.
/// - **Endpoints**: `/accounts/{id}/summary`, `/accounts/{id}/trades`,
///   `/accounts/{id}/transactions/sinceid`.
/// - **Wire format**: monetary values are decimal strings; the raw models
///   deserialize them defensively.
pub struct OandaProvider {
    client: Client,
    token: String,
    base_url: String,
}

impl OandaProvider {
    /// Provider against the live trading environment.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, LIVE_BASE_URL)
    }

    /// Provider against the practice (demo) environment.
    pub fn practice(token: impl Into<String>) -> Self {
        Self::with_base_url(token, PRACTICE_BASE_URL)
    }

    /// Provider against an arbitrary base URL (self-hosted proxy, tests).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            token: token.into(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        account_id: &str,
    ) -> Result<T, CoreError> {
        debug!(url, "fetching from OANDA");

        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CoreError::AccountNotFound(account_id.to_string()));
        }
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: "OANDA".into(),
                message: format!("HTTP {status} for account {account_id}"),
            });
        }

        // Parse failures surface as CoreError::Deserialization
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

// ── OANDA API response envelopes ────────────────────────────────────

#[derive(Deserialize)]
struct SummaryResponse {
    account: AccountSnapshot,
}

#[derive(Deserialize)]
struct TradesResponse {
    #[serde(default)]
    trades: Vec<ClosedTrade>,
}

#[derive(Deserialize)]
struct TransactionsResponse {
    #[serde(default)]
    transactions: Vec<FundTransaction>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AccountProvider for OandaProvider {
    fn name(&self) -> &str {
        "OANDA"
    }

    async fn fetch_snapshot(&self, account_id: &str) -> Result<AccountSnapshot, CoreError> {
        let url = format!("{}/accounts/{account_id}/summary", self.base_url);
        let resp: SummaryResponse = self.get_json(&url, account_id).await?;
        Ok(resp.account)
    }

    async fn fetch_closed_trades(&self, account_id: &str) -> Result<Vec<ClosedTrade>, CoreError> {
        let url = format!(
            "{}/accounts/{account_id}/trades?state=CLOSED&count=500",
            self.base_url
        );
        let resp: TradesResponse = self.get_json(&url, account_id).await?;
        debug!(count = resp.trades.len(), "fetched closed trades");
        Ok(resp.trades)
    }

    async fn fetch_transactions(
        &self,
        account_id: &str,
    ) -> Result<Vec<FundTransaction>, CoreError> {
        let url = format!(
            "{}/accounts/{account_id}/transactions/sinceid?id=1",
            self.base_url
        );
        let resp: TransactionsResponse = self.get_json(&url, account_id).await?;
        debug!(count = resp.transactions.len(), "fetched transactions");
        Ok(resp.transactions)
    }
}
