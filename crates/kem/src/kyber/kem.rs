//! Core Kyber KEM types and the `api::Kem` implementation.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec::Vec};

use qcrypt_api::error::Result as ApiResult;
use qcrypt_api::types::SecretBytes;
use qcrypt_api::{Error as CoreError, Kem as KemTrait, Serialize, SerializeSecret};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use super::ind_cca::{kem_decaps, kem_encaps, kem_encaps_derand, kem_keygen};
use super::params::{KyberParams, SecurityLevel, KYBER_SS_BYTES, KYBER_SYM_BYTES};
use crate::error::Error as KemError;

/// A packed Kyber public key: polyvec t followed by the 32-byte seed rho.
#[derive(Clone, Zeroize)]
pub struct KyberPublicKey(Vec<u8>);

/// A packed Kyber secret key: sk_cpa || pk || H(pk) || z.
#[derive(Clone, Zeroize)]
pub struct KyberSecretKey(Vec<u8>);

/// A packed Kyber ciphertext: compressed u followed by compressed v.
#[derive(Clone)]
pub struct KyberCiphertext(Vec<u8>);

/// A 32-byte Kyber shared secret, zeroized on drop and compared in
/// constant time.
#[derive(Clone, Zeroize)]
pub struct KyberSharedSecret(pub(crate) SecretBytes<KYBER_SS_BYTES>);

impl KyberPublicKey {
    /// Wrap raw bytes without validation; length checks happen at use.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The security level this key's length corresponds to, if any.
    pub fn level(&self) -> Option<SecurityLevel> {
        SecurityLevel::from_public_key_len(self.0.len())
    }
}

impl KyberSecretKey {
    /// Wrap raw bytes without validation; length checks happen at use.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The security level this key's length corresponds to, if any.
    pub fn level(&self) -> Option<SecurityLevel> {
        SecurityLevel::from_secret_key_len(self.0.len())
    }
}

impl KyberCiphertext {
    /// Wrap raw bytes without validation; length checks happen at use.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for KyberPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for KyberPublicKey {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl AsRef<[u8]> for KyberSecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for KyberSecretKey {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl AsRef<[u8]> for KyberCiphertext {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for KyberCiphertext {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl AsRef<[u8]> for KyberSharedSecret {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Serialize for KyberPublicKey {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        if SecurityLevel::from_public_key_len(bytes.len()).is_none() {
            return Err(CoreError::InvalidLength {
                context: "KyberPublicKey::from_bytes",
                expected: 0,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }
}

impl Serialize for KyberCiphertext {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        if SecurityLevel::from_ciphertext_len(bytes.len()).is_none() {
            return Err(CoreError::InvalidLength {
                context: "KyberCiphertext::from_bytes",
                expected: 0,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }
}

impl SerializeSecret for KyberSecretKey {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        if SecurityLevel::from_secret_key_len(bytes.len()).is_none() {
            return Err(CoreError::InvalidLength {
                context: "KyberSecretKey::from_bytes",
                expected: 0,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.clone())
    }
}

impl SerializeSecret for KyberSharedSecret {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        if bytes.len() != KYBER_SS_BYTES {
            return Err(CoreError::InvalidLength {
                context: "KyberSharedSecret::from_bytes",
                expected: KYBER_SS_BYTES,
                actual: bytes.len(),
            });
        }
        let mut ss = [0u8; KYBER_SS_BYTES];
        ss.copy_from_slice(bytes);
        Ok(Self(SecretBytes::new(ss)))
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.as_ref().to_vec())
    }
}

/// Generic Kyber KEM engine, parameterized by one of the three fixed
/// parameter sets. The variants `Kyber512`, `Kyber768` and `Kyber1024`
/// are type aliases of this engine; there is a single code path.
pub struct KyberKem<P: KyberParams> {
    _params: core::marker::PhantomData<P>,
}

fn api_err(e: qcrypt_algorithms::error::Error) -> CoreError {
    CoreError::from(KemError::from(e))
}

impl<P: KyberParams> KyberKem<P> {
    /// Deterministic encapsulation from an explicit 32-byte variant value.
    ///
    /// Used by known-answer tests; production callers use
    /// [`KemTrait::encapsulate`], which draws the variant from the RNG.
    pub fn encapsulate_derand(
        public_key: &KyberPublicKey,
        variant: &[u8; KYBER_SYM_BYTES],
    ) -> ApiResult<(KyberCiphertext, KyberSharedSecret)> {
        qcrypt_api::error::validate::length(
            "Kyber public key",
            public_key.0.len(),
            P::PUBLIC_KEY_BYTES,
        )?;

        let (ct, ss) = kem_encaps_derand::<P>(&public_key.0, variant).map_err(api_err)?;
        Ok((KyberCiphertext(ct), KyberSharedSecret(SecretBytes::new(*ss))))
    }

    /// Encapsulation that also returns the transient variant value m.
    pub fn encapsulate_with_variant<R: CryptoRng + RngCore>(
        rng: &mut R,
        public_key: &KyberPublicKey,
    ) -> ApiResult<(KyberCiphertext, KyberSharedSecret, Zeroizing<[u8; KYBER_SYM_BYTES]>)> {
        qcrypt_api::error::validate::length(
            "Kyber public key",
            public_key.0.len(),
            P::PUBLIC_KEY_BYTES,
        )?;

        let (ct, ss, m) = kem_encaps::<P, R>(&public_key.0, rng).map_err(api_err)?;
        Ok((KyberCiphertext(ct), KyberSharedSecret(SecretBytes::new(*ss)), m))
    }
}

impl<P: KyberParams> KemTrait for KyberKem<P> {
    type PublicKey = KyberPublicKey;
    type SecretKey = KyberSecretKey;
    type SharedSecret = KyberSharedSecret;
    type Ciphertext = KyberCiphertext;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        P::NAME
    }

    fn keypair<R: RngCore + CryptoRng>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        let (pk, sk) = kem_keygen::<P, R>(rng).map_err(api_err)?;
        Ok((KyberPublicKey(pk), KyberSecretKey(sk.to_vec())))
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn encapsulate<R: RngCore + CryptoRng>(
        rng: &mut R,
        public_key: &Self::PublicKey,
    ) -> ApiResult<(Self::Ciphertext, Self::SharedSecret)> {
        let (ct, ss, _variant) = Self::encapsulate_with_variant(rng, public_key)?;
        Ok((ct, ss))
    }

    fn decapsulate(
        secret_key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> ApiResult<Self::SharedSecret> {
        qcrypt_api::error::validate::length(
            "Kyber secret key",
            secret_key.0.len(),
            P::SECRET_KEY_BYTES,
        )?;
        qcrypt_api::error::validate::length(
            "Kyber ciphertext",
            ciphertext.0.len(),
            P::CIPHERTEXT_BYTES,
        )?;

        let ss = kem_decaps::<P>(&secret_key.0, &ciphertext.0).map_err(api_err)?;
        Ok(KyberSharedSecret(SecretBytes::new(*ss)))
    }
}
