//! Kyber IND-CCA2 KEM construction using the Fujisaki-Okamoto transform.
//!
//! Decapsulation never fails on a malformed-but-well-sized ciphertext:
//! implicit rejection substitutes the secret rejection value z for the
//! derived key through a branchless mask, so invalid and valid ciphertexts
//! run the same code path, touch the same memory, and both return a
//! 32-byte secret. Surfacing the mismatch would create a decryption
//! oracle.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec::Vec};

use qcrypt_algorithms::error::{Error as AlgoError, Result as AlgoResult};
use qcrypt_algorithms::hash::{HashFunction, Sha3_256, Sha3_512};
use qcrypt_algorithms::xof::{ExtendableOutputFunction, ShakeXof256};
use qcrypt_internal::constant_time::{ct_select_mask, ct_verify};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use super::cpa_pke::{decrypt_cpa, encrypt_cpa, keypair_cpa};
use super::params::{KyberParams, KYBER_SS_BYTES, KYBER_SYM_BYTES};
use super::serialize::{
    pack_ciphertext, pack_pk, pack_sk, unpack_ciphertext, unpack_pk, unpack_sk,
};

// Type definitions for the IND-CCA2 KEM byte images
pub(crate) type IndCcaPublicKeyBytes = Vec<u8>;
pub(crate) type IndCcaSecretKeyBytes = Zeroizing<Vec<u8>>;
pub(crate) type IndCcaCiphertextBytes = Vec<u8>;
pub(crate) type SharedSecretBytes = Zeroizing<[u8; KYBER_SS_BYTES]>;
pub(crate) type VariantBytes = Zeroizing<[u8; KYBER_SYM_BYTES]>;

// H: SHA3-256, 32-byte output.
fn h_func(data: &[u8]) -> AlgoResult<[u8; KYBER_SYM_BYTES]> {
    let digest = Sha3_256::digest(data)?;
    let mut out = [0u8; KYBER_SYM_BYTES];
    out.copy_from_slice(digest.as_ref());
    Ok(out)
}

// G: SHA3-512, 64 bytes split into two 32-byte halves (K_bar, r).
fn g_func(data: &[u8]) -> AlgoResult<([u8; KYBER_SYM_BYTES], [u8; KYBER_SYM_BYTES])> {
    let digest = Sha3_512::digest(data)?;
    let mut k = [0u8; KYBER_SYM_BYTES];
    let mut r = [0u8; KYBER_SYM_BYTES];
    k.copy_from_slice(&digest.as_ref()[..KYBER_SYM_BYTES]);
    r.copy_from_slice(&digest.as_ref()[KYBER_SYM_BYTES..]);
    Ok((k, r))
}

// KDF: SHAKE-256(K_bar || H(ct)), 32-byte output.
fn kdf(k_bar: &[u8; KYBER_SYM_BYTES], h_ct: &[u8; KYBER_SYM_BYTES]) -> AlgoResult<SharedSecretBytes> {
    let mut xof = ShakeXof256::new();
    xof.update(k_bar)?;
    xof.update(h_ct)?;
    let mut ss = Zeroizing::new([0u8; KYBER_SS_BYTES]);
    xof.squeeze(ss.as_mut())?;
    Ok(ss)
}

/// IND-CCA2 key generation
///
/// The secret key is the concatenation sk_cpa || pk || H(pk) || z; the
/// trailing z is the implicit-rejection value and never leaves the key.
pub(crate) fn kem_keygen<P: KyberParams, R: RngCore + CryptoRng>(
    rng: &mut R,
) -> AlgoResult<(IndCcaPublicKeyBytes, IndCcaSecretKeyBytes)> {
    let (pk_inner, sk_inner) = keypair_cpa::<P, R>(rng)?;

    let pk_bytes = pack_pk(&pk_inner.0, &pk_inner.1);
    let sk_cpa_bytes = Zeroizing::new(pack_sk(&sk_inner));

    let mut z = Zeroizing::new([0u8; KYBER_SYM_BYTES]);
    rng.try_fill_bytes(z.as_mut()).map_err(|_| AlgoError::Random {
        operation: "kem_keygen",
    })?;

    let h_pk = h_func(&pk_bytes)?;

    let mut sk_bytes = Zeroizing::new(Vec::with_capacity(P::SECRET_KEY_BYTES));
    sk_bytes.extend_from_slice(&sk_cpa_bytes);
    sk_bytes.extend_from_slice(&pk_bytes);
    sk_bytes.extend_from_slice(&h_pk);
    sk_bytes.extend_from_slice(z.as_ref());

    Ok((pk_bytes, sk_bytes))
}

/// Deterministic IND-CCA2 encapsulation from an explicit variant value m
///
/// Exposed for known-answer tests and the session layer; the randomized
/// entry point below draws m from the RNG. Steps:
/// (K_bar, r) = G(H(m) || H(pk)), ct = Enc(pk, H(m), r),
/// ss = SHAKE-256(K_bar || H(ct)).
pub(crate) fn kem_encaps_derand<P: KyberParams>(
    pk_bytes: &[u8],
    m: &[u8; KYBER_SYM_BYTES],
) -> AlgoResult<(IndCcaCiphertextBytes, SharedSecretBytes)> {
    let pk_inner = unpack_pk::<P>(pk_bytes)?;

    let m_hashed = Zeroizing::new(h_func(m)?);
    let h_pk = h_func(pk_bytes)?;

    let mut g_input = Zeroizing::new([0u8; 2 * KYBER_SYM_BYTES]);
    g_input[..KYBER_SYM_BYTES].copy_from_slice(m_hashed.as_ref());
    g_input[KYBER_SYM_BYTES..].copy_from_slice(&h_pk);
    let (k_bar, r_coins) = g_func(g_input.as_ref())?;
    let k_bar = Zeroizing::new(k_bar);
    let r_coins = Zeroizing::new(r_coins);

    let (u, v) = encrypt_cpa::<P>(&pk_inner, &m_hashed, &r_coins)?;
    let ct_bytes = pack_ciphertext(&u, &v);

    let h_ct = h_func(&ct_bytes)?;
    let ss = kdf(&k_bar, &h_ct)?;

    Ok((ct_bytes, ss))
}

/// IND-CCA2 encapsulation
///
/// Returns the ciphertext, the shared secret, and the transient variant
/// value m (useful to protocol tests; not required for correctness).
pub(crate) fn kem_encaps<P: KyberParams, R: RngCore + CryptoRng>(
    pk_bytes: &[u8],
    rng: &mut R,
) -> AlgoResult<(IndCcaCiphertextBytes, SharedSecretBytes, VariantBytes)> {
    let mut m = Zeroizing::new([0u8; KYBER_SYM_BYTES]);
    rng.try_fill_bytes(m.as_mut()).map_err(|_| AlgoError::Random {
        operation: "kem_encaps",
    })?;

    let (ct, ss) = kem_encaps_derand::<P>(pk_bytes, &m)?;
    Ok((ct, ss, m))
}

/// IND-CCA2 decapsulation with implicit rejection
///
/// Always returns a 32-byte secret for a well-sized ciphertext. The
/// comparison against the re-encryption visits every byte, and the
/// K_bar'/z selection is a branchless mask, so timing and control flow do
/// not depend on the ciphertext's validity.
pub(crate) fn kem_decaps<P: KyberParams>(
    sk_bytes: &[u8],
    ct_bytes: &[u8],
) -> AlgoResult<SharedSecretBytes> {
    // CCA secret key layout: sk_cpa || pk || H(pk) || z
    let sk_cpa_len = P::POLYVEC_BYTES;
    let pk_len = P::PUBLIC_KEY_BYTES;

    if sk_bytes.len() != P::SECRET_KEY_BYTES {
        return Err(AlgoError::Length {
            context: "kem_decaps secret key",
            expected: P::SECRET_KEY_BYTES,
            actual: sk_bytes.len(),
        });
    }
    if ct_bytes.len() != P::CIPHERTEXT_BYTES {
        return Err(AlgoError::Length {
            context: "kem_decaps ciphertext",
            expected: P::CIPHERTEXT_BYTES,
            actual: ct_bytes.len(),
        });
    }

    let sk_cpa_bytes = &sk_bytes[..sk_cpa_len];
    let pk_bytes = &sk_bytes[sk_cpa_len..sk_cpa_len + pk_len];
    let h_pk = &sk_bytes[sk_cpa_len + pk_len..sk_cpa_len + pk_len + KYBER_SYM_BYTES];
    let z = &sk_bytes[sk_cpa_len + pk_len + KYBER_SYM_BYTES..];

    let ct_inner = unpack_ciphertext::<P>(ct_bytes)?;
    let mut sk_inner = unpack_sk::<P>(sk_cpa_bytes)?;

    // 1. Decrypt to m'
    let m_prime = decrypt_cpa::<P>(&sk_inner, &ct_inner);

    // 2. (K_bar', r') = G(m' || H(pk))
    let mut g_input = Zeroizing::new([0u8; 2 * KYBER_SYM_BYTES]);
    g_input[..KYBER_SYM_BYTES].copy_from_slice(m_prime.as_ref());
    g_input[KYBER_SYM_BYTES..].copy_from_slice(h_pk);
    let (k_bar_prime, r_prime) = g_func(g_input.as_ref())?;
    let mut k_bar_prime = Zeroizing::new(k_bar_prime);
    let r_prime = Zeroizing::new(r_prime);

    // 3. Re-encrypt m' under the stored public key
    let pk_inner = unpack_pk::<P>(pk_bytes)?;
    let (u, v) = encrypt_cpa::<P>(&pk_inner, &m_prime, &r_prime)?;
    let cmp_bytes = pack_ciphertext(&u, &v);

    // 4. Byte comparison with no early exit: 0 if equal, nonzero otherwise
    let fail = ct_verify(ct_bytes, &cmp_bytes);

    // 5. Implicit rejection: select K_bar' or z per byte through the mask.
    //    Runs unconditionally on both the valid and invalid path.
    let mask = ct_select_mask(fail);
    for (kb, &zb) in k_bar_prime.iter_mut().zip(z.iter()) {
        *kb ^= mask & (*kb ^ zb);
    }

    // 6. ss = SHAKE-256(K_bar'' || H(ct))
    let h_ct = h_func(ct_bytes)?;
    let ss = kdf(&k_bar_prime, &h_ct)?;

    sk_inner.zeroize();

    Ok(ss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyber::params::{Kyber1024ParamsImpl, Kyber512ParamsImpl, Kyber768ParamsImpl};
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn round_trip<P: KyberParams>(seed: u64) {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let (pk, sk) = kem_keygen::<P, _>(&mut rng).unwrap();
        assert_eq!(pk.len(), P::PUBLIC_KEY_BYTES);
        assert_eq!(sk.len(), P::SECRET_KEY_BYTES);

        let (ct, ss_enc, _m) = kem_encaps::<P, _>(&pk, &mut rng).unwrap();
        assert_eq!(ct.len(), P::CIPHERTEXT_BYTES);

        let ss_dec = kem_decaps::<P>(&sk, &ct).unwrap();
        assert_eq!(ss_enc.as_ref(), ss_dec.as_ref());
    }

    #[test]
    fn round_trip_512() {
        round_trip::<Kyber512ParamsImpl>(1);
    }

    #[test]
    fn round_trip_768() {
        round_trip::<Kyber768ParamsImpl>(2);
    }

    #[test]
    fn round_trip_1024() {
        round_trip::<Kyber1024ParamsImpl>(3);
    }

    #[test]
    fn derand_encaps_is_deterministic() {
        let mut rng = ChaChaRng::seed_from_u64(4);
        let (pk, _sk) = kem_keygen::<Kyber768ParamsImpl, _>(&mut rng).unwrap();

        let m = [0xABu8; KYBER_SYM_BYTES];
        let (ct1, ss1) = kem_encaps_derand::<Kyber768ParamsImpl>(&pk, &m).unwrap();
        let (ct2, ss2) = kem_encaps_derand::<Kyber768ParamsImpl>(&pk, &m).unwrap();
        assert_eq!(ct1, ct2);
        assert_eq!(ss1.as_ref(), ss2.as_ref());
    }

    #[test]
    fn tampered_ciphertext_rejects_implicitly() {
        let mut rng = ChaChaRng::seed_from_u64(5);
        let (pk, sk) = kem_keygen::<Kyber512ParamsImpl, _>(&mut rng).unwrap();
        let (mut ct, ss_honest, _) = kem_encaps::<Kyber512ParamsImpl, _>(&pk, &mut rng).unwrap();

        ct[0] ^= 0x01;

        // No error, but a different (pseudorandom) secret
        let ss_bogus = kem_decaps::<Kyber512ParamsImpl>(&sk, &ct).unwrap();
        assert_ne!(ss_honest.as_ref(), ss_bogus.as_ref());

        // Deterministic for a fixed key and fixed corrupted ciphertext
        let ss_again = kem_decaps::<Kyber512ParamsImpl>(&sk, &ct).unwrap();
        assert_eq!(ss_bogus.as_ref(), ss_again.as_ref());
    }

    #[test]
    fn wrong_length_inputs_are_format_errors() {
        let mut rng = ChaChaRng::seed_from_u64(6);
        let (pk, sk) = kem_keygen::<Kyber512ParamsImpl, _>(&mut rng).unwrap();
        let (ct, _, _) = kem_encaps::<Kyber512ParamsImpl, _>(&pk, &mut rng).unwrap();

        assert!(kem_decaps::<Kyber512ParamsImpl>(&sk[..sk.len() - 1], &ct).is_err());
        assert!(kem_decaps::<Kyber512ParamsImpl>(&sk, &ct[..ct.len() - 1]).is_err());
        // A 768-level key must be rejected by the 512-level path
        assert!(kem_decaps::<Kyber768ParamsImpl>(&sk, &ct).is_err());
    }
}
