use std::sync::atomic::AtomicBool;

use proptest::prelude::*;

use znn_types::{Hash, Nonce};
use znn_work::{difficulty_to_target, validate_work, WorkGenerator};

proptest! {
    /// Generated PoW always passes its own validation.
    #[test]
    fn generated_pow_always_valid(
        hash_byte in 0u8..=255,
        difficulty in 0u64..20_000,
    ) {
        let digest = Hash::new([hash_byte; 32]);
        let nonce = WorkGenerator.generate(&digest, difficulty, &AtomicBool::new(false)).unwrap();
        prop_assert!(
            validate_work(&digest, &nonce, difficulty),
            "generated nonce must pass validation"
        );
    }

    /// Zero difficulty always passes regardless of nonce.
    #[test]
    fn zero_difficulty_always_passes(
        hash_bytes in prop::array::uniform32(0u8..),
        nonce in any::<u64>(),
    ) {
        prop_assert!(validate_work(&Hash::new(hash_bytes), &Nonce::from_u64(nonce), 0));
    }

    /// Lower difficulty is easier to meet: if valid at D, then valid at D-1.
    #[test]
    fn lower_difficulty_is_easier(
        hash_bytes in prop::array::uniform32(0u8..),
        nonce in any::<u64>(),
        difficulty in 1u64..u64::MAX,
    ) {
        let digest = Hash::new(hash_bytes);
        let nonce = Nonce::from_u64(nonce);
        if validate_work(&digest, &nonce, difficulty) {
            prop_assert!(validate_work(&digest, &nonce, difficulty - 1));
        }
    }

    /// The target never decreases as difficulty rises.
    #[test]
    fn target_is_monotonic(a in any::<u64>(), b in any::<u64>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(difficulty_to_target(lo) <= difficulty_to_target(hi));
    }

    /// Validation is deterministic: same inputs produce same result.
    #[test]
    fn validation_is_deterministic(
        hash_bytes in prop::array::uniform32(0u8..),
        nonce in any::<u64>(),
        difficulty in any::<u64>(),
    ) {
        let digest = Hash::new(hash_bytes);
        let nonce = Nonce::from_u64(nonce);
        prop_assert_eq!(
            validate_work(&digest, &nonce, difficulty),
            validate_work(&digest, &nonce, difficulty)
        );
    }
}
