//! Argon2id encrypted keystore holding a wallet's BIP39 entropy.
//!
//! Encrypts the 32 bytes of entropy with a user-chosen passphrase:
//! 1. Argon2id derives a 32-byte key from the passphrase and a random 16-byte salt
//! 2. AES-256-GCM encrypts the entropy with a random 12-byte nonce and the
//!    additional data `"zenon"`
//! 3. The result is stored as JSON next to the wallet's base address
//!
//! Binary fields are `0x`-prefixed hex. The Argon2 parameters are not stored; every
//! keystore uses [`KdfParams::ZENON`].

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;
use znn_types::{Address, KeyPair};

use crate::error::WalletError;

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const ADDITIONAL_DATA: &[u8] = b"zenon";

pub const CIPHER_NAME: &str = "aes-256-gcm";
pub const KDF_NAME: &str = "argon2.IDKey";
pub const KEYSTORE_VERSION: u32 = 1;

/// Argon2id cost parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl KdfParams {
    /// 64 MiB, one pass, four lanes.
    pub const ZENON: Self = Self {
        memory_kib: 64 * 1024,
        iterations: 1,
        parallelism: 4,
    };
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::ZENON
    }
}

/// The keystore file as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedKeyStore {
    pub base_address: Address,
    pub crypto: CryptoSection,
    pub timestamp: u64,
    pub version: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoSection {
    pub argon2_params: Argon2Section,
    pub cipher_data: String,
    pub cipher_name: String,
    pub kdf: String,
    pub nonce: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Section {
    pub salt: String,
}

/// Encrypt `entropy` under `passphrase`. `base_address` is recorded in clear so that
/// keystores can be listed without a passphrase.
pub fn encrypt_entropy(
    entropy: &[u8],
    passphrase: &str,
    base_address: Address,
    kdf: &KdfParams,
) -> Result<EncryptedKeyStore, WalletError> {
    let mut rng = rand::thread_rng();
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(passphrase, &salt, kdf)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| WalletError::Key(format!("AES key init failed: {e}")))?;
    let cipher_data = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: entropy,
                aad: ADDITIONAL_DATA,
            },
        )
        .map_err(|e| WalletError::Key(format!("encryption failed: {e}")))?;

    Ok(EncryptedKeyStore {
        base_address,
        crypto: CryptoSection {
            argon2_params: Argon2Section {
                salt: to_prefixed_hex(&salt),
            },
            cipher_data: to_prefixed_hex(&cipher_data),
            cipher_name: CIPHER_NAME.to_string(),
            kdf: KDF_NAME.to_string(),
            nonce: to_prefixed_hex(&nonce_bytes),
        },
        timestamp: znn_utils::unix_now(),
        version: KEYSTORE_VERSION,
    })
}

/// Recover the entropy from `file`. A wrong passphrase and a tampered file are
/// indistinguishable and both yield [`WalletError::WrongPassphrase`].
pub fn decrypt_entropy(
    file: &EncryptedKeyStore,
    passphrase: &str,
    kdf: &KdfParams,
) -> Result<Zeroizing<Vec<u8>>, WalletError> {
    if file.version != KEYSTORE_VERSION {
        return Err(WalletError::Format(format!(
            "unsupported keystore version {}",
            file.version
        )));
    }
    if file.crypto.cipher_name != CIPHER_NAME || file.crypto.kdf != KDF_NAME {
        return Err(WalletError::Format(format!(
            "unsupported cipher {} with kdf {}",
            file.crypto.cipher_name, file.crypto.kdf
        )));
    }

    let salt = from_prefixed_hex(&file.crypto.argon2_params.salt, "salt")?;
    let nonce_bytes = from_prefixed_hex(&file.crypto.nonce, "nonce")?;
    let cipher_data = from_prefixed_hex(&file.crypto.cipher_data, "cipherData")?;
    if nonce_bytes.len() != NONCE_LEN {
        return Err(WalletError::Format(format!(
            "nonce must be {NONCE_LEN} bytes, got {}",
            nonce_bytes.len()
        )));
    }

    let key = derive_key(passphrase, &salt, kdf)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| WalletError::Key(format!("AES key init failed: {e}")))?;
    let entropy = cipher
        .decrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: &cipher_data,
                aad: ADDITIONAL_DATA,
            },
        )
        .map_err(|_| WalletError::WrongPassphrase)?;
    Ok(Zeroizing::new(entropy))
}

fn derive_key(
    passphrase: &str,
    salt: &[u8],
    kdf: &KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>, WalletError> {
    let params = Params::new(kdf.memory_kib, kdf.iterations, kdf.parallelism, Some(KEY_LEN))
        .map_err(|e| WalletError::Key(format!("Argon2 params error: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(passphrase.as_bytes(), salt, &mut output[..])
        .map_err(|e| WalletError::Key(format!("Argon2 hashing failed: {e}")))?;
    Ok(output)
}

fn to_prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn from_prefixed_hex(text: &str, field: &str) -> Result<Vec<u8>, WalletError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|e| WalletError::Format(format!("{field}: {e}")))
}

/// An unlocked wallet: the entropy, its mnemonic, and the BIP39 seed keys are derived
/// from.
pub struct KeyStore {
    entropy: Zeroizing<Vec<u8>>,
    mnemonic: Zeroizing<String>,
    seed: Zeroizing<[u8; 64]>,
}

impl KeyStore {
    /// A fresh wallet with 256 bits of OS randomness.
    pub fn generate() -> Result<Self, WalletError> {
        let entropy = znn_crypto::generate_entropy();
        Self::from_entropy(&entropy[..])
    }

    pub fn from_entropy(entropy: &[u8]) -> Result<Self, WalletError> {
        let mnemonic = Zeroizing::new(znn_crypto::mnemonic_from_entropy(entropy)?);
        let seed = znn_crypto::seed_from_mnemonic(&mnemonic)?;
        Ok(Self {
            entropy: Zeroizing::new(entropy.to_vec()),
            mnemonic,
            seed,
        })
    }

    pub fn from_mnemonic(phrase: &str) -> Result<Self, WalletError> {
        let entropy = znn_crypto::entropy_from_mnemonic(phrase)?;
        Self::from_entropy(&entropy[..])
    }

    pub fn entropy(&self) -> &[u8] {
        &self.entropy[..]
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Key pair of account `index` (`m/44'/73404'/index'`).
    pub fn keypair(&self, index: u32) -> Result<KeyPair, WalletError> {
        Ok(znn_crypto::derive_account_keypair(&self.seed[..], index)?)
    }

    pub fn address(&self, index: u32) -> Result<Address, WalletError> {
        Ok(znn_crypto::derive_address(&self.keypair(index)?.public))
    }

    /// Address of account 0, used to name and identify the keystore.
    pub fn base_address(&self) -> Result<Address, WalletError> {
        self.address(0)
    }

    /// Addresses of accounts `start..=end`.
    pub fn derive_addresses(&self, start: u32, end: u32) -> Result<Vec<Address>, WalletError> {
        if end < start {
            return Err(WalletError::InvalidRange { start, end });
        }
        (start..=end).map(|i| self.address(i)).collect()
    }

    pub fn encrypt(&self, passphrase: &str, kdf: &KdfParams) -> Result<EncryptedKeyStore, WalletError> {
        encrypt_entropy(self.entropy(), passphrase, self.base_address()?, kdf)
    }

    pub fn decrypt(
        file: &EncryptedKeyStore,
        passphrase: &str,
        kdf: &KdfParams,
    ) -> Result<Self, WalletError> {
        let entropy = decrypt_entropy(file, passphrase, kdf)?;
        Self::from_entropy(&entropy[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cheap parameters so tests don't spend seconds in Argon2.
    const TEST_KDF: KdfParams = KdfParams {
        memory_kib: 256,
        iterations: 1,
        parallelism: 1,
    };

    const ABANDON_ART: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon art";

    #[test]
    fn mnemonic_round_trips_through_entropy() {
        let ks = KeyStore::from_mnemonic(ABANDON_ART).unwrap();
        assert_eq!(ks.entropy(), &[0u8; 32][..]);
        assert_eq!(ks.mnemonic().split_whitespace().count(), 24);
        assert!(ks.mnemonic().ends_with("art"));
    }

    #[test]
    fn invalid_mnemonic_is_rejected() {
        assert!(matches!(
            KeyStore::from_mnemonic("abandon abandon abandon"),
            Err(WalletError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn accounts_differ_by_index() {
        let ks = KeyStore::from_mnemonic(ABANDON_ART).unwrap();
        let addresses = ks.derive_addresses(0, 2).unwrap();
        assert_eq!(addresses.len(), 3);
        assert_eq!(addresses[0], ks.base_address().unwrap());
        assert_ne!(addresses[0], addresses[1]);
        assert_ne!(addresses[1], addresses[2]);
        assert!(!addresses[0].is_embedded());
    }

    #[test]
    fn reversed_range_is_rejected() {
        let ks = KeyStore::from_mnemonic(ABANDON_ART).unwrap();
        assert!(matches!(
            ks.derive_addresses(3, 1),
            Err(WalletError::InvalidRange { start: 3, end: 1 })
        ));
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let ks = KeyStore::generate().unwrap();
        let file = ks.encrypt("correct horse", &TEST_KDF).unwrap();
        let back = KeyStore::decrypt(&file, "correct horse", &TEST_KDF).unwrap();
        assert_eq!(back.entropy(), ks.entropy());
        assert_eq!(file.base_address, ks.base_address().unwrap());
    }

    #[test]
    fn wrong_passphrase_fails() {
        let ks = KeyStore::generate().unwrap();
        let file = ks.encrypt("right", &TEST_KDF).unwrap();
        assert!(matches!(
            KeyStore::decrypt(&file, "wrong", &TEST_KDF),
            Err(WalletError::WrongPassphrase)
        ));
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let ks = KeyStore::generate().unwrap();
        let mut file = ks.encrypt("pass", &TEST_KDF).unwrap();
        let last = file.crypto.cipher_data.pop().unwrap();
        file.crypto
            .cipher_data
            .push(if last == '0' { '1' } else { '0' });
        assert!(matches!(
            KeyStore::decrypt(&file, "pass", &TEST_KDF),
            Err(WalletError::WrongPassphrase)
        ));
    }

    #[test]
    fn file_layout_matches_wire_names() {
        let ks = KeyStore::from_mnemonic(ABANDON_ART).unwrap();
        let file = ks.encrypt("pass", &TEST_KDF).unwrap();
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["crypto"]["cipherName"], "aes-256-gcm");
        assert_eq!(json["crypto"]["kdf"], "argon2.IDKey");
        let salt = json["crypto"]["argon2Params"]["salt"].as_str().unwrap();
        assert!(salt.starts_with("0x"));
        assert_eq!(salt.len(), 2 + 2 * SALT_LEN);
        // 32 bytes of entropy plus the 16-byte GCM tag
        assert_eq!(
            json["crypto"]["cipherData"].as_str().unwrap().len(),
            2 + 2 * 48
        );
        assert!(json["baseAddress"].as_str().unwrap().starts_with("z1qq"));
    }

    #[test]
    fn unsupported_version_is_a_format_error() {
        let ks = KeyStore::generate().unwrap();
        let mut file = ks.encrypt("pass", &TEST_KDF).unwrap();
        file.version = 2;
        assert!(matches!(
            KeyStore::decrypt(&file, "pass", &TEST_KDF),
            Err(WalletError::Format(_))
        ));
    }

    #[test]
    fn zenon_kdf_parameters() {
        assert_eq!(KdfParams::default().memory_kib, 65536);
        assert_eq!(KdfParams::default().iterations, 1);
        assert_eq!(KdfParams::default().parallelism, 4);
    }
}
