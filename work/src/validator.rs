//! PoW validation.

use znn_types::{Hash, Nonce};

use crate::target::{difficulty_to_target, work_value};

/// Whether `nonce` is sufficient work on `digest` at `difficulty`.
pub fn validate_work(digest: &Hash, nonce: &Nonce, difficulty: u64) -> bool {
    if difficulty == 0 {
        return true;
    }
    work_value(digest, nonce.as_bytes()) >= difficulty_to_target(difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_difficulty_always_valid() {
        assert!(validate_work(&Hash::ZERO, &Nonce::ZERO, 0));
    }

    #[test]
    fn exact_work_value_threshold() {
        let digest = Hash::new([0xAA; 32]);
        let nonce = Nonce::from_u64(12345);
        let value = work_value(&digest, nonce.as_bytes());
        // A value of v clears difficulty d iff v >= MAX - MAX/d; the easiest
        // non-trivial difficulty (2) needs the top bit.
        let clears_two = value >= u64::MAX - u64::MAX / 2;
        assert_eq!(validate_work(&digest, &nonce, 2), clears_two);
        assert!(validate_work(&digest, &nonce, 1));
    }
}
