//! Wallet core library for znn.
//!
//! Provides everything a wallet application needs to hold keys:
//! - The encrypted keystore file format (Argon2id + AES-256-GCM)
//! - [`KeyStore`]: mnemonic-backed key derivation per account index
//! - [`KeyStoreManager`]: the wallet directory (list, create, import, read, export)

pub mod error;
pub mod keystore;
pub mod manager;

pub use error::WalletError;
pub use keystore::{decrypt_entropy, encrypt_entropy, EncryptedKeyStore, KdfParams, KeyStore};
pub use manager::KeyStoreManager;
