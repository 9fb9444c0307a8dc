#![no_main]

use libfuzzer_sys::fuzz_target;

// Node responses are untrusted; decoding them must fail cleanly, never panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(block) = serde_json::from_slice::<znn_types::AccountBlock>(data) {
        // Whatever decoded must encode again.
        let _ = serde_json::to_vec(&block).expect("decoded block re-encodes");
    }
    let _ = serde_json::from_slice::<znn_types::HashHeight>(data);
    let _ = serde_json::from_slice::<znn_types::PlasmaInfo>(data);
    let _ = serde_json::from_slice::<znn_types::RequiredPow>(data);
});
