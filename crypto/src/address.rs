//! User address derivation from public keys.
//!
//! A user address is the kind byte `0x00` followed by the first 19 bytes of
//! SHA3-256(public_key).

use znn_types::address::{ADDRESS_LEN, USER_ADDRESS_BYTE};
use znn_types::{Address, PublicKey};

use crate::hash::sha3_256;

/// Derive the account address controlled by `public_key`.
pub fn derive_address(public_key: &PublicKey) -> Address {
    let digest = sha3_256(public_key.as_bytes());
    let mut bytes = [0u8; ADDRESS_LEN];
    bytes[0] = USER_ADDRESS_BYTE;
    bytes[1..].copy_from_slice(&digest[..ADDRESS_LEN - 1]);
    Address::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn derived_address_is_user_kind() {
        let kp = keypair_from_seed(&[7u8; 32]);
        let addr = derive_address(&kp.public);
        assert!(!addr.is_embedded());
        assert_eq!(addr.as_bytes()[0], 0);
        assert!(addr.to_string().starts_with("z1q"));
    }

    #[test]
    fn derivation_is_deterministic() {
        let kp = keypair_from_seed(&[9u8; 32]);
        assert_eq!(derive_address(&kp.public), derive_address(&kp.public));
    }

    #[test]
    fn address_tail_is_key_digest() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let addr = derive_address(&kp.public);
        assert_eq!(&addr.as_bytes()[1..], &sha3_256(&kp.public.0)[..19]);
    }

    #[test]
    fn different_keys_different_addresses() {
        let a = derive_address(&keypair_from_seed(&[1u8; 32]).public);
        let b = derive_address(&keypair_from_seed(&[2u8; 32]).public);
        assert_ne!(a, b);
    }
}
