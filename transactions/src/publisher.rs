//! Hands signed blocks to the node.

use crate::draft::{PublishedBlock, SignedBlock};
use crate::error::{LedgerError, TransactionError};
use crate::ledger::Ledger;

/// Submit `block`. A JSON-RPC error from the node is a rejection; anything else that
/// goes wrong is a transport failure. No retry.
pub async fn publish<L: Ledger + ?Sized>(
    ledger: &L,
    block: SignedBlock,
) -> Result<PublishedBlock, TransactionError> {
    let wire = block.to_account_block();
    ledger.publish(&wire).await.map_err(|e| match e {
        LedgerError::Rpc { message, .. } => TransactionError::RejectedByNetwork(message),
        LedgerError::Transport(reason) | LedgerError::Decode(reason) => {
            TransactionError::TransportFailure(reason)
        }
    })?;
    Ok(block.into_receipt())
}
