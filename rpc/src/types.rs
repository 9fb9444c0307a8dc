//! Response types for node queries.

use std::collections::BTreeMap;

use serde::Deserialize;
use znn_types::{Address, Amount, Hash, HashHeight, TokenStandard};

/// The parts of an account's latest block the pipeline needs.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontierBlock {
    pub hash: Hash,
    pub height: u64,
}

impl From<FrontierBlock> for HashHeight {
    fn from(block: FrontierBlock) -> Self {
        HashHeight::new(block.hash, block.height)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Momentum {
    pub hash: Hash,
    pub height: u64,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub producer: Option<Address>,
}

impl Momentum {
    pub fn hash_height(&self) -> HashHeight {
        HashHeight::new(self.hash, self.height)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub token_name: String,
    pub token_symbol: String,
    #[serde(default)]
    pub token_domain: String,
    pub decimals: u8,
    pub token_standard: TokenStandard,
    #[serde(default)]
    pub total_supply: Amount,
    #[serde(default)]
    pub max_supply: Amount,
    #[serde(default)]
    pub owner: Option<Address>,
    #[serde(default)]
    pub is_mintable: bool,
    #[serde(default)]
    pub is_burnable: bool,
    #[serde(default)]
    pub is_utility: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceInfo {
    #[serde(default)]
    pub token_info: Option<TokenInfo>,
    pub balance: Amount,
}

/// Account summary from `ledger.getAccountInfoByAddress`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub address: Address,
    #[serde(default)]
    pub account_height: u64,
    #[serde(default)]
    pub balance_info_map: BTreeMap<TokenStandard, BalanceInfo>,
}

impl AccountInfo {
    /// Balance held in `token`, zero when the account never received any.
    pub fn balance_of(&self, token: &TokenStandard) -> Amount {
        self.balance_info_map
            .get(token)
            .map(|info| info.balance)
            .unwrap_or(Amount::ZERO)
    }
}

/// A send block waiting for this account to receive it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreceivedBlock {
    pub hash: Hash,
    pub address: Address,
    pub to_address: Address,
    pub amount: Amount,
    pub token_standard: TokenStandard,
    #[serde(default)]
    pub height: u64,
    #[serde(default)]
    pub token_info: Option<TokenInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnreceivedBlockList {
    #[serde(default)]
    pub list: Vec<UnreceivedBlock>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub more: bool,
}

/// A plasma fusion from `embedded.plasma.getEntriesByAddress`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionEntry {
    pub id: Hash,
    pub qsr_amount: Amount,
    pub beneficiary: Address,
    /// Momentum height from which the fusion can be cancelled.
    pub expiration_height: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionEntryList {
    #[serde(default)]
    pub qsr_amount: Amount,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub list: Vec<FusionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeEntry {
    pub id: Hash,
    pub amount: Amount,
    #[serde(default)]
    pub weighted_amount: Amount,
    #[serde(default)]
    pub start_timestamp: i64,
    /// Unix seconds from which the stake can be revoked.
    pub expiration_timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeList {
    #[serde(default)]
    pub total_amount: Amount,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub list: Vec<StakeEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UncollectedReward {
    #[serde(default)]
    pub znn_amount: Amount,
    #[serde(default)]
    pub qsr_amount: Amount,
}

impl UncollectedReward {
    pub fn is_empty(&self) -> bool {
        self.znn_amount.is_zero() && self.qsr_amount.is_zero()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarInfo {
    pub name: String,
    pub owner_address: Address,
    #[serde(default)]
    pub producer_address: Option<Address>,
    #[serde(default)]
    pub withdraw_address: Option<Address>,
    #[serde(default)]
    pub is_revocable: bool,
    #[serde(default)]
    pub revoke_cooldown: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentinelInfo {
    pub owner: Address,
    #[serde(default)]
    pub registration_timestamp: i64,
    #[serde(default)]
    pub is_revocable: bool,
    #[serde(default)]
    pub revoke_cooldown: i64,
    #[serde(default)]
    pub active: bool,
}
