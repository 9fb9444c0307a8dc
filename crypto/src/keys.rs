//! Ed25519 key construction.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use znn_types::{KeyPair, PrivateKey, PublicKey};

fn pair_of(signing_key: SigningKey) -> KeyPair {
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Generate a fresh key pair from the OS random source. Only used by tests and
/// throwaway signers; wallet keys always come from a mnemonic.
pub fn generate_keypair() -> KeyPair {
    pair_of(SigningKey::generate(&mut OsRng))
}

/// The public half of `private`.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    PublicKey(SigningKey::from_bytes(&private.0).verifying_key().to_bytes())
}

/// Complete a key pair around an owned private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = public_from_private(&private);
    KeyPair { public, private }
}

/// Build the key pair whose Ed25519 seed is `seed`. SLIP-10 account keys land here.
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    pair_of(SigningKey::from_bytes(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_nonzero_and_distinct() {
        let a = generate_keypair();
        let b = generate_keypair();
        assert_ne!(a.public.0, [0u8; 32]);
        assert_ne!(a.public, b.public);
    }

    #[test]
    fn private_reconstructs_same_public() {
        let kp = keypair_from_seed(&[42u8; 32]);
        let again = keypair_from_private(PrivateKey(kp.private.0));
        assert_eq!(kp.public, again.public);
        assert_eq!(public_from_private(&kp.private), kp.public);
    }

    #[test]
    fn seed_is_the_private_key() {
        let kp = keypair_from_seed(&[3u8; 32]);
        assert_eq!(kp.private.0, [3u8; 32]);
    }

    #[test]
    fn rfc8032_test_vector_one() {
        let seed: [u8; 32] =
            hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60")
                .unwrap()
                .try_into()
                .unwrap();
        let kp = keypair_from_seed(&seed);
        assert_eq!(
            hex::encode(kp.public.0),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
    }
}
