//! The signing seam and the signing stage.

use znn_types::{Address, Hash, KeyPair, PublicKey, Signature};

use crate::draft::{ResolvedBlock, SignedBlock};
use crate::error::TransactionError;

/// An account that can authorize blocks.
pub trait BlockSigner: Send + Sync {
    fn address(&self) -> Address;
    fn public_key(&self) -> PublicKey;
    fn sign(&self, digest: &Hash) -> Result<Signature, String>;
}

impl BlockSigner for KeyPair {
    fn address(&self) -> Address {
        znn_crypto::derive_address(&self.public)
    }

    fn public_key(&self) -> PublicKey {
        self.public
    }

    fn sign(&self, digest: &Hash) -> Result<Signature, String> {
        Ok(znn_crypto::sign_message(digest.as_bytes(), &self.private))
    }
}

/// Sign the block's digest. The public key always comes from the signer.
pub fn sign_block<S: BlockSigner + ?Sized>(
    block: ResolvedBlock,
    signer: &S,
) -> Result<SignedBlock, TransactionError> {
    let signature = signer
        .sign(block.digest())
        .map_err(TransactionError::SigningFailure)?;
    Ok(block.with_signature(signer.public_key(), signature))
}
