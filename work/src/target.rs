//! Difficulty to target conversion.

use znn_crypto::sha3_256_multi;
use znn_types::Hash;

/// The smallest work value accepted at `difficulty`.
///
/// A uniformly random work value clears the target with probability `1/difficulty`.
/// Difficulty 0 or 1 means any nonce is accepted.
pub fn difficulty_to_target(difficulty: u64) -> u64 {
    if difficulty == 0 {
        return 0;
    }
    u64::MAX - u64::MAX / difficulty
}

/// Work value of `nonce` for `digest`: the first eight bytes of
/// SHA3-256(digest || nonce), little-endian.
pub fn work_value(digest: &Hash, nonce: &[u8; 8]) -> u64 {
    let hash = sha3_256_multi(&[digest.as_bytes(), nonce]);
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash[..8]);
    u64::from_le_bytes(head)
}
