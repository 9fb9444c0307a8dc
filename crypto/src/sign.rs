//! Ed25519 signing and verification of block digests.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use znn_types::{PrivateKey, PublicKey, Signature};

/// Sign `message` (in practice, a 32-byte block digest).
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(message).to_bytes())
}

/// Check `signature` over `message` against `public_key`. Malformed keys verify as
/// false rather than erroring.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &sig).is_ok()
}
