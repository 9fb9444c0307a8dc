//! JSON-RPC client for Zenon nodes.
//!
//! Provides:
//! - The JSON-RPC 2.0 envelope and response decoding
//! - [`NodeClient`], an HTTP client that implements the transaction pipeline's
//!   `Ledger` facade
//! - Response types for the account, momentum and unreceived-block queries the CLI shows

pub mod client;
pub mod envelope;
pub mod error;
pub mod types;

pub use client::NodeClient;
pub use error::RpcError;
pub use types::{
    AccountInfo, BalanceInfo, FrontierBlock, FusionEntry, FusionEntryList, Momentum, PillarInfo,
    SentinelInfo, StakeEntry, StakeList, TokenInfo, UncollectedReward, UnreceivedBlock,
    UnreceivedBlockList,
};
