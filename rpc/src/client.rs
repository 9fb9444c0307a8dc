//! HTTP JSON-RPC client for a Zenon node.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use znn_transactions::{Ledger, LedgerError};
use znn_types::{
    AccountBlock, Address, Amount, HashHeight, PlasmaInfo, RequiredPow, RequiredPowParams,
    TokenStandard,
};

use crate::envelope::{decode_response, Request};
use crate::error::RpcError;
use crate::types::{
    AccountInfo, FrontierBlock, FusionEntryList, Momentum, PillarInfo, SentinelInfo, StakeList,
    TokenInfo, UncollectedReward, UnreceivedBlockList,
};

/// Talks JSON-RPC 2.0 over HTTP POST to one node.
pub struct NodeClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl NodeClient {
    pub const DEFAULT_URL: &'static str = "http://127.0.0.1:35997";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(url: &str) -> Result<Self, RpcError> {
        Self::with_timeout(url, Self::DEFAULT_TIMEOUT)
    }

    /// Every request, connect included, gives up after `timeout`.
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, RpcError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| RpcError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RpcError::InvalidUrl(format!(
                "{url}: expected an http or https url"
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one request and decode its `result`.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(id, method, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&Request::new(id, method, params))
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        // Nodes report JSON-RPC errors with non-2xx codes too; prefer the error object.
        match decode_response(&body) {
            Err(RpcError::Decode(_)) if !status.is_success() => Err(RpcError::Http(status.as_u16())),
            other => {
                if let Err(e) = &other {
                    tracing::debug!(id, method, error = %e, "rpc call failed");
                }
                other
            }
        }
    }

    pub async fn account_info(&self, address: &Address) -> Result<AccountInfo, RpcError> {
        self.call("ledger.getAccountInfoByAddress", json!([address]))
            .await
    }

    /// One page of send blocks addressed to `address` that it has not received yet.
    pub async fn unreceived_blocks(
        &self,
        address: &Address,
        page_index: u32,
        page_size: u32,
    ) -> Result<UnreceivedBlockList, RpcError> {
        self.call(
            "ledger.getUnreceivedBlocksByAddress",
            json!([address, page_index, page_size]),
        )
        .await
    }

    pub async fn momentum(&self) -> Result<Momentum, RpcError> {
        self.call("ledger.getFrontierMomentum", json!([])).await
    }

    pub async fn plasma_info(&self, address: &Address) -> Result<PlasmaInfo, RpcError> {
        self.call("embedded.plasma.get", json!([address])).await
    }

    /// Token metadata, or `None` when no such token was issued.
    pub async fn token_by_standard(
        &self,
        token: &TokenStandard,
    ) -> Result<Option<TokenInfo>, RpcError> {
        self.call("embedded.token.getByZts", json!([token])).await
    }

    pub async fn fusion_entries(
        &self,
        address: &Address,
        page_index: u32,
        page_size: u32,
    ) -> Result<FusionEntryList, RpcError> {
        self.call(
            "embedded.plasma.getEntriesByAddress",
            json!([address, page_index, page_size]),
        )
        .await
    }

    pub async fn stake_entries(
        &self,
        address: &Address,
        page_index: u32,
        page_size: u32,
    ) -> Result<StakeList, RpcError> {
        self.call(
            "embedded.stake.getEntriesByAddress",
            json!([address, page_index, page_size]),
        )
        .await
    }

    pub async fn uncollected_stake_reward(
        &self,
        address: &Address,
    ) -> Result<UncollectedReward, RpcError> {
        self.call("embedded.stake.getUncollectedReward", json!([address]))
            .await
    }

    pub async fn pillar_by_name(&self, name: &str) -> Result<Option<PillarInfo>, RpcError> {
        self.call("embedded.pillar.getByName", json!([name])).await
    }

    /// QSR deposited towards a pillar registration and not yet withdrawn.
    pub async fn pillar_deposited_qsr(&self, address: &Address) -> Result<Amount, RpcError> {
        self.call("embedded.pillar.getDepositedQsr", json!([address]))
            .await
    }

    /// QSR deposited towards a sentinel registration and not yet withdrawn.
    pub async fn sentinel_deposited_qsr(&self, address: &Address) -> Result<Amount, RpcError> {
        self.call("embedded.sentinel.getDepositedQsr", json!([address]))
            .await
    }

    pub async fn sentinel_by_owner(
        &self,
        address: &Address,
    ) -> Result<Option<SentinelInfo>, RpcError> {
        self.call("embedded.sentinel.getByOwner", json!([address]))
            .await
    }
}

impl Ledger for NodeClient {
    async fn frontier_block(&self, address: &Address) -> Result<Option<HashHeight>, LedgerError> {
        let block: Option<FrontierBlock> = self
            .call("ledger.getFrontierAccountBlock", json!([address]))
            .await?;
        Ok(block.map(HashHeight::from))
    }

    async fn frontier_momentum(&self) -> Result<HashHeight, LedgerError> {
        Ok(self.momentum().await?.hash_height())
    }

    async fn plasma(&self, address: &Address) -> Result<PlasmaInfo, LedgerError> {
        Ok(self.plasma_info(address).await?)
    }

    async fn required_pow(&self, params: &RequiredPowParams) -> Result<RequiredPow, LedgerError> {
        Ok(self
            .call("embedded.plasma.getRequiredPoWForAccountBlock", json!([params]))
            .await?)
    }

    async fn publish(&self, block: &AccountBlock) -> Result<(), LedgerError> {
        let _: Value = self
            .call("ledger.publishRawTransaction", json!([block]))
            .await?;
        Ok(())
    }
}
