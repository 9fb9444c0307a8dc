//! Cryptographic primitives for the znn wallet.
//!
//! - **Ed25519** for block signing and signature verification
//! - **SHA3-256** for block hashes and address derivation
//! - **BIP39** mnemonics with **SLIP-10** hardened derivation for account keys

pub mod address;
pub mod hash;
pub mod keys;
pub mod mnemonic;
pub mod sign;

pub use address::derive_address;
pub use hash::{sha3_256, sha3_256_multi};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use mnemonic::{
    derive_account_keypair, derive_slip10, entropy_from_mnemonic, generate_entropy,
    mnemonic_from_entropy, seed_from_mnemonic, validate_mnemonic, MnemonicError, ZNN_COIN_TYPE,
};
pub use sign::{sign_message, verify_signature};
