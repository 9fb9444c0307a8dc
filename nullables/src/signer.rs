//! Nullable signer.

use std::sync::atomic::{AtomicUsize, Ordering};

use znn_transactions::BlockSigner;
use znn_types::{Address, Hash, KeyPair, PublicKey, Signature};

/// A deterministic account backed by a seeded key pair.
pub struct NullSigner {
    keys: KeyPair,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl NullSigner {
    pub fn from_seed(seed: u8) -> Self {
        Self {
            keys: znn_crypto::keypair_from_seed(&[seed; 32]),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Refuses every signing request with `reason`.
    pub fn failing(seed: u8, reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::from_seed(seed)
        }
    }

    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for NullSigner {
    fn default() -> Self {
        Self::from_seed(1)
    }
}

impl BlockSigner for NullSigner {
    fn address(&self) -> Address {
        self.keys.address()
    }

    fn public_key(&self) -> PublicKey {
        self.keys.public
    }

    fn sign(&self, digest: &Hash) -> Result<Signature, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(reason) => Err(reason.clone()),
            None => self.keys.sign(digest),
        }
    }
}
