//! One-exchange key-agreement session.
//!
//! An owned value threaded through an init -> complete sequence. The
//! session validates that every key it is handed belongs to its parameter
//! set before any cryptographic work starts, and completing an exchange
//! consumes it, so stale per-session state cannot leak into a second
//! agreement. A session must not be shared across threads mid-exchange;
//! ownership makes that the default.

use qcrypt_api::error::Result as ApiResult;
use qcrypt_api::Kem as KemTrait;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::kem::{KyberCiphertext, KyberKem, KyberPublicKey, KyberSecretKey, KyberSharedSecret};
use super::params::KyberParams;

/// An initialized key-agreement session holding one party's private key.
pub struct KyberExchange<P: KyberParams> {
    secret_key: KyberSecretKey,
    _params: core::marker::PhantomData<P>,
}

/// The sender side's completed exchange: the shared secret plus the
/// ciphertext to transmit to the peer.
pub struct CompletedExchange {
    /// The agreed 32-byte secret.
    pub shared_secret: KyberSharedSecret,
    /// The encapsulation to send to the private key's owner.
    pub ciphertext: KyberCiphertext,
}

impl<P: KyberParams> KyberExchange<P> {
    /// Initialize a session with this party's private key.
    ///
    /// A key whose length does not match the session's parameter set is an
    /// incompatible-parameters error, reported before any cryptographic
    /// work begins.
    pub fn init(secret_key: KyberSecretKey) -> ApiResult<Self> {
        qcrypt_api::error::validate::length(
            "KyberExchange private key",
            secret_key.as_ref().len(),
            P::SECRET_KEY_BYTES,
        )?;

        Ok(Self {
            secret_key,
            _params: core::marker::PhantomData,
        })
    }

    /// Complete the exchange as the sender: encapsulate a fresh shared
    /// secret to the peer's public key.
    ///
    /// Consumes the session; a new agreement requires a new `init`.
    pub fn accept_public_key<R: CryptoRng + RngCore>(
        mut self,
        rng: &mut R,
        peer_public_key: &KyberPublicKey,
    ) -> ApiResult<CompletedExchange> {
        qcrypt_api::error::validate::length(
            "KyberExchange peer public key",
            peer_public_key.as_ref().len(),
            P::PUBLIC_KEY_BYTES,
        )?;

        let (ciphertext, shared_secret) = KyberKem::<P>::encapsulate(rng, peer_public_key)?;
        self.secret_key.zeroize();

        Ok(CompletedExchange {
            shared_secret,
            ciphertext,
        })
    }

    /// Complete the exchange as the receiver: decapsulate the peer's
    /// ciphertext with this session's private key.
    ///
    /// Consumes the session. A tampered ciphertext of the right length
    /// still yields a (useless) secret; only format errors fail.
    pub fn accept_ciphertext(mut self, ciphertext: &KyberCiphertext) -> ApiResult<KyberSharedSecret> {
        let shared_secret = KyberKem::<P>::decapsulate(&self.secret_key, ciphertext)?;
        self.secret_key.zeroize();
        Ok(shared_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyber::params::{Kyber512ParamsImpl, Kyber768ParamsImpl};
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    #[test]
    fn two_party_agreement_through_sessions() {
        let mut rng = ChaChaRng::seed_from_u64(11);

        let alice_keys = KyberKem::<Kyber768ParamsImpl>::keypair(&mut rng).unwrap();
        let bob_keys = KyberKem::<Kyber768ParamsImpl>::keypair(&mut rng).unwrap();

        // Bob encapsulates to Alice's public key
        let bob_session = KyberExchange::<Kyber768ParamsImpl>::init(bob_keys.1.clone()).unwrap();
        let completed = bob_session
            .accept_public_key(&mut rng, &alice_keys.0)
            .unwrap();

        // Alice decapsulates Bob's ciphertext
        let alice_session = KyberExchange::<Kyber768ParamsImpl>::init(alice_keys.1.clone()).unwrap();
        let alice_secret = alice_session.accept_ciphertext(&completed.ciphertext).unwrap();

        assert_eq!(alice_secret.as_ref(), completed.shared_secret.as_ref());
    }

    #[test]
    fn init_rejects_mismatched_parameter_set() {
        let mut rng = ChaChaRng::seed_from_u64(12);
        let keys_512 = KyberKem::<Kyber512ParamsImpl>::keypair(&mut rng).unwrap();

        // A 512-level key cannot initialize a 768-level session
        assert!(KyberExchange::<Kyber768ParamsImpl>::init(keys_512.1).is_err());
    }

    #[test]
    fn sender_rejects_peer_key_of_wrong_level() {
        let mut rng = ChaChaRng::seed_from_u64(13);
        let keys_512 = KyberKem::<Kyber512ParamsImpl>::keypair(&mut rng).unwrap();
        let keys_768 = KyberKem::<Kyber768ParamsImpl>::keypair(&mut rng).unwrap();

        let session = KyberExchange::<Kyber512ParamsImpl>::init(keys_512.1).unwrap();
        assert!(session.accept_public_key(&mut rng, &keys_768.0).is_err());
    }
}
