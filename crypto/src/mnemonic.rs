//! BIP39 mnemonics and SLIP-10 Ed25519 key derivation.
//!
//! A wallet is 32 bytes of entropy, shown to the user as a 24-word mnemonic. The BIP39
//! seed (empty passphrase) feeds SLIP-10 derivation along `m/44'/73404'/i'`, where `i`
//! is the account index. Every path segment is hardened, as Ed25519 SLIP-10 requires.

use bip39::Mnemonic;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use thiserror::Error;
use zeroize::Zeroizing;
use znn_types::KeyPair;

use crate::keys::keypair_from_seed;

type HmacSha512 = Hmac<Sha512>;

/// SLIP-44 coin type registered for Zenon.
pub const ZNN_COIN_TYPE: u32 = 73404;

const HARDENED: u32 = 0x8000_0000;
const SLIP10_ED25519_KEY: &[u8] = b"ed25519 seed";

/// Errors arising from mnemonic operations.
#[derive(Debug, Error)]
pub enum MnemonicError {
    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}

/// Fresh 256-bit wallet entropy.
pub fn generate_entropy() -> Zeroizing<[u8; 32]> {
    let mut entropy = Zeroizing::new([0u8; 32]);
    rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut entropy[..]);
    entropy
}

/// The mnemonic phrase for `entropy` (24 words for 32 bytes).
pub fn mnemonic_from_entropy(entropy: &[u8]) -> Result<String, MnemonicError> {
    let mnemonic = Mnemonic::from_entropy(entropy)
        .map_err(|e| MnemonicError::DerivationFailed(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Recover the entropy behind a mnemonic phrase.
pub fn entropy_from_mnemonic(phrase: &str) -> Result<Zeroizing<Vec<u8>>, MnemonicError> {
    let mnemonic = Mnemonic::parse_normalized(phrase.trim())
        .map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))?;
    Ok(Zeroizing::new(mnemonic.to_entropy()))
}

/// The 64-byte BIP39 seed of a mnemonic, with an empty passphrase.
pub fn seed_from_mnemonic(phrase: &str) -> Result<Zeroizing<[u8; 64]>, MnemonicError> {
    let mnemonic = Mnemonic::parse_normalized(phrase.trim())
        .map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))?;
    Ok(Zeroizing::new(mnemonic.to_seed_normalized("")))
}

/// Validate that a phrase is a well-formed BIP39 mnemonic.
pub fn validate_mnemonic(phrase: &str) -> bool {
    Mnemonic::parse_normalized(phrase.trim()).is_ok()
}

fn hmac_split(key: &[u8], parts: &[&[u8]]) -> Result<([u8; 32], [u8; 32]), MnemonicError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| MnemonicError::DerivationFailed(e.to_string()))?;
    for part in parts {
        mac.update(part);
    }
    let out = mac.finalize().into_bytes();
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&out[..32]);
    right.copy_from_slice(&out[32..]);
    Ok((left, right))
}

/// SLIP-10 Ed25519 derivation of the private key at `path` (indices without the
/// hardened bit; it is always applied).
pub fn derive_slip10(seed: &[u8], path: &[u32]) -> Result<Zeroizing<[u8; 32]>, MnemonicError> {
    let (mut key, mut chain_code) = hmac_split(SLIP10_ED25519_KEY, &[seed])?;
    for &index in path {
        if index >= HARDENED {
            return Err(MnemonicError::DerivationFailed(format!(
                "path index {index} out of range"
            )));
        }
        let (child_key, child_chain) = hmac_split(
            &chain_code,
            &[&[0u8][..], &key[..], &(index | HARDENED).to_be_bytes()[..]],
        )?;
        key = child_key;
        chain_code = child_chain;
    }
    Ok(Zeroizing::new(key))
}

/// Key pair of account `index` in the wallet described by `seed`.
pub fn derive_account_keypair(seed: &[u8], index: u32) -> Result<KeyPair, MnemonicError> {
    let key = derive_slip10(seed, &[44, ZNN_COIN_TYPE, index])?;
    Ok(keypair_from_seed(&key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn entropy_round_trips_through_phrase() {
        let entropy = generate_entropy();
        let phrase = mnemonic_from_entropy(&entropy[..]).unwrap();
        assert_eq!(phrase.split_whitespace().count(), 24);
        let back = entropy_from_mnemonic(&phrase).unwrap();
        assert_eq!(back.as_slice(), &entropy[..]);
    }

    #[test]
    fn all_zero_entropy_is_the_abandon_phrase() {
        assert_eq!(mnemonic_from_entropy(&[0u8; 32]).unwrap(), PHRASE);
    }

    #[test]
    fn invalid_phrase_rejected() {
        assert!(!validate_mnemonic("not a valid mnemonic phrase"));
        assert!(!validate_mnemonic(""));
        assert!(matches!(
            entropy_from_mnemonic("invalid words here"),
            Err(MnemonicError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn slip10_test_vector_master() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let key = derive_slip10(&seed, &[]).unwrap();
        assert_eq!(
            hex::encode(&key[..]),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
    }

    #[test]
    fn slip10_test_vector_first_child() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let key = derive_slip10(&seed, &[0]).unwrap();
        assert_eq!(
            hex::encode(&key[..]),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
    }

    #[test]
    fn rejects_prehardened_index() {
        assert!(derive_slip10(&[0u8; 16], &[HARDENED]).is_err());
    }

    #[test]
    fn accounts_are_distinct_and_stable() {
        let seed = seed_from_mnemonic(PHRASE).unwrap();
        let a0 = derive_account_keypair(&seed[..], 0).unwrap();
        let a0_again = derive_account_keypair(&seed[..], 0).unwrap();
        let a1 = derive_account_keypair(&seed[..], 1).unwrap();
        assert_eq!(a0.public, a0_again.public);
        assert_ne!(a0.public, a1.public);
    }
}
