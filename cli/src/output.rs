//! Human-readable rendering of amounts and results.

use znn_rpc::TokenInfo;
use znn_transactions::{PublishedBlock, ResourcePayment};
use znn_types::{Amount, TokenStandard, COIN_DECIMALS};

/// `1.50000000 ZNN`. Tokens without a known symbol show their standard.
pub fn token_amount(amount: Amount, decimals: u8, token: &TokenStandard) -> String {
    let label = token
        .symbol()
        .map(str::to_string)
        .unwrap_or_else(|| token.to_string());
    format!("{} {label}", amount.format(decimals))
}

/// Decimals and label from node-provided token info, falling back to the coin
/// defaults.
pub fn described_amount(amount: Amount, info: Option<&TokenInfo>, token: &TokenStandard) -> String {
    match info {
        Some(info) => format!("{} {}", amount.format(info.decimals), info.token_symbol),
        None => token_amount(amount, COIN_DECIMALS, token),
    }
}

pub fn payment(payment: &ResourcePayment) -> String {
    match payment {
        ResourcePayment::Plasma { fused_plasma } => format!("{fused_plasma} plasma"),
        ResourcePayment::Work { difficulty, .. } => format!("proof-of-work at difficulty {difficulty}"),
    }
}

pub fn receipt(block: &PublishedBlock) -> String {
    format!(
        "block {} at height {} (paid with {})",
        block.hash,
        block.height,
        payment(&block.payment)
    )
}
