//! Fills in chain position and momentum acknowledgment.

use znn_types::params::BLOCK_VERSION;
use znn_types::{Address, Hash};

use crate::draft::{AssembledBlock, BlockHeader, TransactionDraft};
use crate::error::TransactionError;
use crate::ledger::Ledger;

/// Place `draft` on top of `address`'s chain.
///
/// Height is one past the frontier (1 for an empty chain) and the previous hash is the
/// frontier's hash (zero for an empty chain). The current frontier momentum becomes the
/// acknowledgment. Any failed lookup consumes the draft and returns `QueryFailure`.
pub async fn assemble<L: Ledger + ?Sized>(
    ledger: &L,
    address: Address,
    chain_identifier: u64,
    draft: TransactionDraft,
) -> Result<AssembledBlock, TransactionError> {
    let frontier = ledger
        .frontier_block(&address)
        .await
        .map_err(TransactionError::QueryFailure)?;
    let (height, previous_hash) = match frontier {
        Some(prior) => (prior.height + 1, prior.hash),
        None => (1, Hash::ZERO),
    };

    let momentum = ledger
        .frontier_momentum()
        .await
        .map_err(TransactionError::QueryFailure)?;

    tracing::debug!(
        %address,
        height,
        momentum_height = momentum.height,
        "assembled block"
    );

    Ok(AssembledBlock::new(BlockHeader {
        version: BLOCK_VERSION,
        chain_identifier,
        block_type: draft.block_type(),
        address,
        height,
        previous_hash,
        momentum_acknowledged: momentum,
        to_address: *draft.to_address(),
        amount: draft.amount(),
        token_standard: *draft.token_standard(),
        from_block_hash: *draft.from_block_hash(),
        data: draft.data().to_vec(),
    }))
}
