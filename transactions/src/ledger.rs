//! The ledger facade the pipeline consumes.

use std::future::Future;

use znn_types::{AccountBlock, Address, HashHeight, PlasmaInfo, RequiredPow, RequiredPowParams};

use crate::error::LedgerError;

/// Queries and submission against the network.
///
/// Implemented over JSON-RPC by `znn_rpc::NodeClient` and in memory by
/// `znn_nullables::NullLedger`.
pub trait Ledger: Send + Sync {
    /// Hash and height of the account's latest block, `None` for an account with no
    /// blocks yet.
    fn frontier_block(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<Option<HashHeight>, LedgerError>> + Send;

    /// The latest momentum, acknowledged by new blocks.
    fn frontier_momentum(&self) -> impl Future<Output = Result<HashHeight, LedgerError>> + Send;

    /// The account's plasma right now.
    fn plasma(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<PlasmaInfo, LedgerError>> + Send;

    /// Difficulty the node expects for a block with these parameters.
    fn required_pow(
        &self,
        params: &RequiredPowParams,
    ) -> impl Future<Output = Result<RequiredPow, LedgerError>> + Send;

    /// Hand a fully signed block to the node.
    fn publish(&self, block: &AccountBlock) -> impl Future<Output = Result<(), LedgerError>> + Send;
}
