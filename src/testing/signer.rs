use starknet_crypto::{get_public_key, rfc6979_generate_k, sign};

use crate::transaction::error::TransactionError;
use crate::Felt252;

/// Deterministic STARK-curve key pair used to authorize sandbox transactions.
/// The private key never changes after construction.
#[derive(Debug, Clone)]
pub struct Signer {
    private_key: Felt252,
    public_key: Felt252,
}

impl Signer {
    pub fn new<K: Into<Felt252>>(private_key: K) -> Self {
        let private_key = private_key.into();
        let public_key = get_public_key(&private_key);
        Signer {
            private_key,
            public_key,
        }
    }

    pub fn public_key(&self) -> Felt252 {
        self.public_key
    }

    /// Signs a message hash, returning the `[r, s]` signature pair.
    pub fn sign(&self, message_hash: &Felt252) -> Result<[Felt252; 2], TransactionError> {
        // `ecdsa_sign` (a 2-arg convenience wrapper in pre-0.7 starknet-crypto)
        // was split in 0.7 into deterministic RFC-6979 `k` derivation plus
        // `sign`. Reproduce the wrapper's happy path to preserve behavior.
        let k = rfc6979_generate_k(message_hash, &self.private_key, None);
        let signature = sign(&self.private_key, message_hash, &k)?;
        Ok([signature.r, signature.s])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starknet_crypto::verify;

    #[test]
    fn signatures_verify_against_the_public_key() {
        let signer = Signer::new(1);
        let message_hash = Felt252::from(123456u64);

        let [r, s] = signer.sign(&message_hash).unwrap();
        assert!(matches!(
            verify(&signer.public_key(), &message_hash, &r, &s),
            Ok(true)
        ));

        // A different key does not verify the same signature.
        let other = Signer::new(2);
        assert_ne!(signer.public_key(), other.public_key());
        assert!(matches!(
            verify(&other.public_key(), &message_hash, &r, &s),
            Ok(false)
        ));
    }

    #[test]
    fn signing_is_deterministic() {
        let signer = Signer::new(3);
        let message_hash = Felt252::from(47u64);
        assert_eq!(
            signer.sign(&message_hash).unwrap(),
            signer.sign(&message_hash).unwrap()
        );
    }
}
