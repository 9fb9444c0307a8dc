//! Block digest computation.

use znn_crypto::{sha3_256, sha3_256_multi};
use znn_types::Hash;

use crate::draft::BlockHeader;

/// Big-endian amount, left-padded to a 32-byte word.
fn amount_word(raw: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&raw.to_be_bytes());
    word
}

/// SHA3-256 over the structural fields, in wire order. Integers are big-endian;
/// the payload enters as its own SHA3-256. Resource fields are not covered: the
/// proof-of-work nonce is computed over this digest instead.
pub fn block_digest(header: &BlockHeader) -> Hash {
    let data_hash = sha3_256(&header.data);
    let amount = amount_word(header.amount.raw());
    Hash::new(sha3_256_multi(&[
        &header.version.to_be_bytes(),
        &header.chain_identifier.to_be_bytes(),
        &header.block_type.code().to_be_bytes(),
        header.previous_hash.as_bytes(),
        &header.height.to_be_bytes(),
        header.momentum_acknowledged.hash.as_bytes(),
        &header.momentum_acknowledged.height.to_be_bytes(),
        header.address.as_bytes(),
        header.to_address.as_bytes(),
        &amount,
        header.token_standard.as_bytes(),
        header.from_block_hash.as_bytes(),
        &data_hash,
    ]))
}
