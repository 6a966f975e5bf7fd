//! Kyber CPA-secure Public Key Encryption scheme.
//!
//! The three operations here are deterministic given their inputs (key
//! generation takes its randomness as an explicit RNG draw, encryption as
//! an explicit coin seed). Decryption performs no validation: a tampered
//! ciphertext decrypts to a wrong but well-formed message, and the CCA
//! layer in `ind_cca` is responsible for catching it.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};

use qcrypt_algorithms::error::{Error as AlgoError, Result as AlgoResult};
use qcrypt_algorithms::hash::{HashFunction, Sha3_512};
use qcrypt_algorithms::poly::polynomial::Polynomial;
use qcrypt_algorithms::poly::sampling::{cbd_eta2, cbd_eta3, reject_uniform};
use qcrypt_algorithms::xof::{ExtendableOutputFunction, ShakeXof128, ShakeXof256};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use super::params::{KyberParams, KYBER_N, KYBER_SYM_BYTES};
use super::polyvec::PolyVec;

/// Inner form of an IND-CPA public key: (t in NTT domain, seed rho for A)
pub(crate) type CpaPublicKeyInner<P> = (PolyVec<P>, [u8; KYBER_SYM_BYTES]);
/// Inner form of an IND-CPA secret key: s in NTT domain
pub(crate) type CpaSecretKeyInner<P> = PolyVec<P>;
/// Inner form of a CPA ciphertext before compression: (u, v)
pub(crate) type CpaCiphertextInner<P> = (PolyVec<P>, Polynomial);

/// XOF block size used by the matrix sampler (the SHAKE-128 rate)
const XOF_BLOCK_BYTES: usize = 168;
/// Initial squeeze: three blocks is almost always enough for 256 accepted
/// 12-bit draws
const XOF_INITIAL_BYTES: usize = 3 * XOF_BLOCK_BYTES;

/// Generate the public matrix A (or A^T) from the seed rho.
///
/// Each cell absorbs `rho || (j, i)` — `(i, j)` when transposed — into
/// SHAKE-128 and rejection-samples 256 coefficients from consecutive
/// 12-bit windows of the output stream. The loop squeezes additional
/// rate-sized blocks until the cell is full; there is no iteration cap.
pub(crate) fn gen_matrix<P: KyberParams>(
    rho: &[u8; KYBER_SYM_BYTES],
    transposed: bool,
) -> AlgoResult<Vec<PolyVec<P>>> {
    let mut a = Vec::with_capacity(P::K);

    for i in 0..P::K {
        let mut row = PolyVec::<P>::zero();

        for j in 0..P::K {
            let mut xof = ShakeXof128::new();
            xof.update(rho)?;
            if transposed {
                xof.update(&[i as u8, j as u8])?;
            } else {
                xof.update(&[j as u8, i as u8])?;
            }

            let poly = &mut row.polys[j];
            let mut buf = [0u8; XOF_INITIAL_BYTES];
            xof.squeeze(&mut buf)?;
            let mut filled = reject_uniform(&buf, &mut poly.coeffs);

            while filled < KYBER_N {
                let mut block = [0u8; XOF_BLOCK_BYTES];
                xof.squeeze(&mut block)?;
                filled += reject_uniform(&block, &mut poly.coeffs[filled..]);
            }
        }

        a.push(row);
    }

    Ok(a)
}

/// PRF: SHAKE-256(seed || nonce), `len` output bytes
fn prf(seed: &[u8; KYBER_SYM_BYTES], nonce: u8, len: usize) -> AlgoResult<Zeroizing<Vec<u8>>> {
    let mut xof = ShakeXof256::new();
    xof.update(seed)?;
    xof.update(&[nonce])?;
    let mut out = Zeroizing::new(vec![0u8; len]);
    xof.squeeze(&mut out)?;
    Ok(out)
}

/// Deterministic noise polynomial from a seed and a domain-separating nonce
///
/// eta selects both the PRF output length and the CBD bit layout; the two
/// layouts are distinct packings, not one parameterized routine.
pub(crate) fn get_noise_poly(
    seed: &[u8; KYBER_SYM_BYTES],
    nonce: u8,
    eta: u8,
) -> AlgoResult<Polynomial> {
    let len = eta as usize * KYBER_N / 4;
    let buf = prf(seed, nonce, len)?;
    match eta {
        3 => cbd_eta3(&buf),
        2 => cbd_eta2(&buf),
        _ => Err(AlgoError::param("eta", "Kyber noise parameter must be 2 or 3")),
    }
}

/// Kyber CPA PKE key generation.
///
/// Draws a fresh 32-byte seed, expands it with SHA3-512 into the public
/// seed rho and the noise seed sigma, and computes t = A*s + e in the NTT
/// domain.
pub(crate) fn keypair_cpa<P: KyberParams, R: RngCore + CryptoRng>(
    rng: &mut R,
) -> AlgoResult<(CpaPublicKeyInner<P>, CpaSecretKeyInner<P>)> {
    let mut d = Zeroizing::new([0u8; KYBER_SYM_BYTES]);
    rng.try_fill_bytes(d.as_mut()).map_err(|_| AlgoError::Random {
        operation: "keypair_cpa",
    })?;

    let full_seed = Sha3_512::digest(d.as_ref())?;
    let mut rho = [0u8; KYBER_SYM_BYTES];
    let mut sigma = Zeroizing::new([0u8; KYBER_SYM_BYTES]);
    rho.copy_from_slice(&full_seed.as_ref()[..KYBER_SYM_BYTES]);
    sigma
        .as_mut()
        .copy_from_slice(&full_seed.as_ref()[KYBER_SYM_BYTES..]);

    let a = gen_matrix::<P>(&rho, false)?;

    let mut s = PolyVec::<P>::zero();
    let mut e = PolyVec::<P>::zero();
    let mut nonce = 0u8;
    for i in 0..P::K {
        s.polys[i] = get_noise_poly(&sigma, nonce, P::ETA1)?;
        nonce = nonce.wrapping_add(1);
    }
    for i in 0..P::K {
        e.polys[i] = get_noise_poly(&sigma, nonce, P::ETA1)?;
        nonce = nonce.wrapping_add(1);
    }

    s.ntt_inplace();
    s.reduce();
    e.ntt_inplace();

    let mut t = PolyVec::<P>::zero();
    for (i, row) in a.iter().enumerate() {
        t.polys[i] = row.pointwise_accum(&s);
        t.polys[i].to_mont();
    }
    t.add_assign(&e);
    t.reduce();

    e.zeroize();

    Ok(((t, rho), s))
}

/// Kyber CPA PKE encryption.
///
/// Fully deterministic given (public key, message, coins); the CCA layer
/// relies on this to re-encrypt during decapsulation.
pub(crate) fn encrypt_cpa<P: KyberParams>(
    pk: &CpaPublicKeyInner<P>,
    msg: &[u8; KYBER_SYM_BYTES],
    coins: &[u8; KYBER_SYM_BYTES],
) -> AlgoResult<CpaCiphertextInner<P>> {
    let (t_hat, rho) = pk;

    let at = gen_matrix::<P>(rho, true)?;

    let mut sp = PolyVec::<P>::zero();
    let mut ep = PolyVec::<P>::zero();
    for i in 0..P::K {
        sp.polys[i] = get_noise_poly(coins, i as u8, P::ETA1)?;
        ep.polys[i] = get_noise_poly(coins, (i + P::K) as u8, P::ETA2)?;
    }
    let epp = get_noise_poly(coins, (2 * P::K) as u8, P::ETA2)?;

    let k_poly = Polynomial::from_message(msg);

    sp.ntt_inplace();
    sp.reduce();

    let mut u = PolyVec::<P>::zero();
    for (i, row) in at.iter().enumerate() {
        u.polys[i] = row.pointwise_accum(&sp);
    }
    let mut v = t_hat.pointwise_accum(&sp);

    u.inv_ntt_inplace();
    v.from_ntt_inplace();

    u.add_assign(&ep);
    v = v.add(&epp).add(&k_poly);

    u.reduce();
    v.reduce();

    sp.zeroize();

    Ok((u, v))
}

/// Kyber CPA PKE decryption.
///
/// Computes m' = v - NTT^-1(s^T * NTT(u)). No validation: the output is
/// always a well-formed 32-byte message.
pub(crate) fn decrypt_cpa<P: KyberParams>(
    s_hat: &CpaSecretKeyInner<P>,
    ct: &CpaCiphertextInner<P>,
) -> Zeroizing<[u8; KYBER_SYM_BYTES]> {
    let (u, v) = ct;

    let mut u_hat = u.clone();
    u_hat.ntt_inplace();

    let mut mp = s_hat.pointwise_accum(&u_hat);
    mp.from_ntt_inplace();

    let mut m_poly = v.sub(&mp);
    m_poly.reduce();

    let msg = Zeroizing::new(m_poly.to_message());
    m_poly.zeroize();
    mp.zeroize();
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyber::params::{Kyber512ParamsImpl, Kyber768ParamsImpl};
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    #[test]
    fn matrix_generation_is_deterministic_and_in_range() {
        let rho = [0x42u8; KYBER_SYM_BYTES];
        let a1 = gen_matrix::<Kyber768ParamsImpl>(&rho, false).unwrap();
        let a2 = gen_matrix::<Kyber768ParamsImpl>(&rho, false).unwrap();
        assert_eq!(a1, a2);

        for row in &a1 {
            for poly in row.polys.iter() {
                for &c in poly.coeffs.iter() {
                    assert!((0..3329).contains(&c));
                }
            }
        }
    }

    #[test]
    fn transposed_matrix_differs() {
        let rho = [0x17u8; KYBER_SYM_BYTES];
        let a = gen_matrix::<Kyber768ParamsImpl>(&rho, false).unwrap();
        let at = gen_matrix::<Kyber768ParamsImpl>(&rho, true).unwrap();
        // A[0][1] should equal A^T[1][0]
        assert_eq!(a[0].polys[1], at[1].polys[0]);
        assert_ne!(a[0].polys[1], a[1].polys[0]);
    }

    #[test]
    fn noise_nonces_are_domain_separating() {
        let seed = [0x99u8; KYBER_SYM_BYTES];
        let n0 = get_noise_poly(&seed, 0, 2).unwrap();
        let n1 = get_noise_poly(&seed, 1, 2).unwrap();
        assert_ne!(n0, n1);
        assert_eq!(n0, get_noise_poly(&seed, 0, 2).unwrap());
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let mut rng = ChaChaRng::seed_from_u64(7);
        let (pk, sk) = keypair_cpa::<Kyber512ParamsImpl, _>(&mut rng).unwrap();

        let msg = [0x5Au8; KYBER_SYM_BYTES];
        let coins = [0xC3u8; KYBER_SYM_BYTES];
        let ct = encrypt_cpa::<Kyber512ParamsImpl>(&pk, &msg, &coins).unwrap();
        let recovered = decrypt_cpa::<Kyber512ParamsImpl>(&sk, &ct);

        assert_eq!(recovered.as_ref(), &msg);
    }

    #[test]
    fn decrypt_survives_compression_round_trip() {
        use crate::kyber::serialize::{pack_ciphertext, unpack_ciphertext};

        let mut rng = ChaChaRng::seed_from_u64(8);
        let (pk, sk) = keypair_cpa::<Kyber768ParamsImpl, _>(&mut rng).unwrap();

        let msg = [0x0Fu8; KYBER_SYM_BYTES];
        let coins = [0xF0u8; KYBER_SYM_BYTES];
        let (u, v) = encrypt_cpa::<Kyber768ParamsImpl>(&pk, &msg, &coins).unwrap();

        let packed = pack_ciphertext(&u, &v);
        let ct = unpack_ciphertext::<Kyber768ParamsImpl>(&packed).unwrap();
        let recovered = decrypt_cpa::<Kyber768ParamsImpl>(&sk, &ct);

        assert_eq!(recovered.as_ref(), &msg);
    }
}
