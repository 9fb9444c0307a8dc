#![no_main]

use libfuzzer_sys::fuzz_target;
use znn_types::{Hash, Nonce};

fuzz_target!(|data: &[u8]| {
    // 32 bytes of digest, 8 of nonce, optionally 8 of difficulty.
    if data.len() < 40 {
        return;
    }
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&data[..32]);
    let mut nonce = [0u8; 8];
    nonce.copy_from_slice(&data[32..40]);
    let difficulty = match data.get(40..48) {
        Some(bytes) => u64::from_le_bytes(bytes.try_into().unwrap()),
        None => znn_types::params::DEFAULT_POW_DIFFICULTY,
    };

    let digest = Hash::new(digest);
    let nonce = Nonce::from_u64(u64::from_le_bytes(nonce));
    let _ = znn_work::validate_work(&digest, &nonce, difficulty);
    let _ = znn_work::difficulty_to_target(difficulty);
});
