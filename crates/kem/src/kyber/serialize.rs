//! Serialization and lossy compression for Kyber data structures.
//!
//! Every byte layout in here is a wire format shared with other Kyber
//! implementations. The compression packings differ between d = 4/5 and
//! d = 10/11 and are not self-describing; the grouping of bits into bytes
//! must be preserved exactly. All unpack functions reject buffers whose
//! length differs from the declared parameter set.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};

use qcrypt_algorithms::error::{Error as AlgoError, Result as AlgoResult};
use qcrypt_algorithms::poly::polynomial::Polynomial;

use super::params::{KyberParams, KYBER_N, KYBER_POLY_BYTES, KYBER_Q, KYBER_SYM_BYTES};
use super::polyvec::PolyVec;

const Q: u32 = KYBER_Q as u32;

/// Lossy compression of a polynomial to d bits per coefficient (d = 4 or 5)
///
/// Coefficients are canonicalized first; each is re-quantized as
/// round(2^d / q * c) mod 2^d.
pub(crate) fn compress_poly<P: KyberParams>(poly: &Polynomial) -> Vec<u8> {
    let mut canonical = poly.clone();
    canonical.conditional_sub_q();

    let mut r = vec![0u8; P::POLY_COMPRESSED_BYTES];
    let mut rr = 0usize;
    let mut t = [0u8; 8];

    match P::DV {
        4 => {
            for i in 0..KYBER_N / 8 {
                for (j, tj) in t.iter_mut().enumerate() {
                    let c = canonical.coeffs[8 * i + j] as u32;
                    *tj = ((((c << 4) + Q / 2) / Q) & 15) as u8;
                }
                r[rr] = t[0] | (t[1] << 4);
                r[rr + 1] = t[2] | (t[3] << 4);
                r[rr + 2] = t[4] | (t[5] << 4);
                r[rr + 3] = t[6] | (t[7] << 4);
                rr += 4;
            }
        }
        _ => {
            for i in 0..KYBER_N / 8 {
                for (j, tj) in t.iter_mut().enumerate() {
                    let c = canonical.coeffs[8 * i + j] as u32;
                    *tj = ((((c << 5) + Q / 2) / Q) & 31) as u8;
                }
                r[rr] = t[0] | (t[1] << 5);
                r[rr + 1] = (t[1] >> 3) | (t[2] << 2) | (t[3] << 7);
                r[rr + 2] = (t[3] >> 1) | (t[4] << 4);
                r[rr + 3] = (t[4] >> 4) | (t[5] << 1) | (t[6] << 6);
                r[rr + 4] = (t[6] >> 2) | (t[7] << 3);
                rr += 5;
            }
        }
    }
    r
}

/// Decompression of a d-bit polynomial (d = 4 or 5)
///
/// Compression is lossy, so this does not invert `compress_poly` exactly;
/// the result is the nearest representable coefficient.
pub(crate) fn decompress_poly<P: KyberParams>(a: &[u8]) -> AlgoResult<Polynomial> {
    if a.len() != P::POLY_COMPRESSED_BYTES {
        return Err(AlgoError::Length {
            context: "decompress_poly",
            expected: P::POLY_COMPRESSED_BYTES,
            actual: a.len(),
        });
    }

    let mut p = Polynomial::zero();
    match P::DV {
        4 => {
            let mut aa = 0usize;
            for i in 0..KYBER_N / 2 {
                p.coeffs[2 * i] = (((a[aa] as u32 & 15) * Q + 8) >> 4) as i16;
                p.coeffs[2 * i + 1] = ((((a[aa] as u32) >> 4) * Q + 8) >> 4) as i16;
                aa += 1;
            }
        }
        _ => {
            let mut aa = 0usize;
            let mut t = [0u32; 8];
            for i in 0..KYBER_N / 8 {
                t[0] = a[aa] as u32 & 31;
                t[1] = (((a[aa] as u32) >> 5) | ((a[aa + 1] as u32) << 3)) & 31;
                t[2] = ((a[aa + 1] as u32) >> 2) & 31;
                t[3] = (((a[aa + 1] as u32) >> 7) | ((a[aa + 2] as u32) << 1)) & 31;
                t[4] = (((a[aa + 2] as u32) >> 4) | ((a[aa + 3] as u32) << 4)) & 31;
                t[5] = ((a[aa + 3] as u32) >> 1) & 31;
                t[6] = (((a[aa + 3] as u32) >> 6) | ((a[aa + 4] as u32) << 2)) & 31;
                t[7] = ((a[aa + 4] as u32) >> 3) & 31;
                aa += 5;
                for (j, &tj) in t.iter().enumerate() {
                    p.coeffs[8 * i + j] = ((tj * Q + 16) >> 5) as i16;
                }
            }
        }
    }
    Ok(p)
}

/// Lossy compression of a polynomial vector to d bits per coefficient
/// (d = 10 or 11)
pub(crate) fn compress_polyvec<P: KyberParams>(pv: &PolyVec<P>) -> Vec<u8> {
    let mut canonical = pv.clone();
    canonical.conditional_sub_q();

    let mut r = vec![0u8; P::POLYVEC_COMPRESSED_BYTES];
    let mut rr = 0usize;

    match P::DU {
        10 => {
            let mut t = [0u32; 4];
            for poly in canonical.polys.iter() {
                for j in 0..KYBER_N / 4 {
                    for (k, tk) in t.iter_mut().enumerate() {
                        let c = poly.coeffs[4 * j + k] as u32;
                        *tk = (((c << 10) + Q / 2) / Q) & 0x3FF;
                    }
                    r[rr] = t[0] as u8;
                    r[rr + 1] = ((t[0] >> 8) | (t[1] << 2)) as u8;
                    r[rr + 2] = ((t[1] >> 6) | (t[2] << 4)) as u8;
                    r[rr + 3] = ((t[2] >> 4) | (t[3] << 6)) as u8;
                    r[rr + 4] = (t[3] >> 2) as u8;
                    rr += 5;
                }
            }
        }
        _ => {
            let mut t = [0u32; 8];
            for poly in canonical.polys.iter() {
                for j in 0..KYBER_N / 8 {
                    for (k, tk) in t.iter_mut().enumerate() {
                        let c = poly.coeffs[8 * j + k] as u32;
                        *tk = (((c << 11) + Q / 2) / Q) & 0x7FF;
                    }
                    r[rr] = t[0] as u8;
                    r[rr + 1] = ((t[0] >> 8) | (t[1] << 3)) as u8;
                    r[rr + 2] = ((t[1] >> 5) | (t[2] << 6)) as u8;
                    r[rr + 3] = (t[2] >> 2) as u8;
                    r[rr + 4] = ((t[2] >> 10) | (t[3] << 1)) as u8;
                    r[rr + 5] = ((t[3] >> 7) | (t[4] << 4)) as u8;
                    r[rr + 6] = ((t[4] >> 4) | (t[5] << 7)) as u8;
                    r[rr + 7] = (t[5] >> 1) as u8;
                    r[rr + 8] = ((t[5] >> 9) | (t[6] << 2)) as u8;
                    r[rr + 9] = ((t[6] >> 6) | (t[7] << 5)) as u8;
                    r[rr + 10] = (t[7] >> 3) as u8;
                    rr += 11;
                }
            }
        }
    }
    r
}

/// Decompression of a d-bit polynomial vector (d = 10 or 11)
pub(crate) fn decompress_polyvec<P: KyberParams>(a: &[u8]) -> AlgoResult<PolyVec<P>> {
    if a.len() != P::POLYVEC_COMPRESSED_BYTES {
        return Err(AlgoError::Length {
            context: "decompress_polyvec",
            expected: P::POLYVEC_COMPRESSED_BYTES,
            actual: a.len(),
        });
    }

    let mut pv = PolyVec::<P>::zero();
    let mut aa = 0usize;

    match P::DU {
        10 => {
            let mut t = [0u32; 4];
            for poly in pv.polys.iter_mut() {
                for j in 0..KYBER_N / 4 {
                    t[0] = (a[aa] as u32) | ((a[aa + 1] as u32) << 8);
                    t[1] = ((a[aa + 1] as u32) >> 2) | ((a[aa + 2] as u32) << 6);
                    t[2] = ((a[aa + 2] as u32) >> 4) | ((a[aa + 3] as u32) << 4);
                    t[3] = ((a[aa + 3] as u32) >> 6) | ((a[aa + 4] as u32) << 2);
                    aa += 5;
                    for (k, &tk) in t.iter().enumerate() {
                        poly.coeffs[4 * j + k] = (((tk & 0x3FF) * Q + 512) >> 10) as i16;
                    }
                }
            }
        }
        _ => {
            let mut t = [0u32; 8];
            for poly in pv.polys.iter_mut() {
                for j in 0..KYBER_N / 8 {
                    t[0] = (a[aa] as u32) | ((a[aa + 1] as u32) << 8);
                    t[1] = ((a[aa + 1] as u32) >> 3) | ((a[aa + 2] as u32) << 5);
                    t[2] = ((a[aa + 2] as u32) >> 6)
                        | ((a[aa + 3] as u32) << 2)
                        | ((a[aa + 4] as u32) << 10);
                    t[3] = ((a[aa + 4] as u32) >> 1) | ((a[aa + 5] as u32) << 7);
                    t[4] = ((a[aa + 5] as u32) >> 4) | ((a[aa + 6] as u32) << 4);
                    t[5] = ((a[aa + 6] as u32) >> 7)
                        | ((a[aa + 7] as u32) << 1)
                        | ((a[aa + 8] as u32) << 9);
                    t[6] = ((a[aa + 8] as u32) >> 2) | ((a[aa + 9] as u32) << 6);
                    t[7] = ((a[aa + 9] as u32) >> 5) | ((a[aa + 10] as u32) << 3);
                    aa += 11;
                    for (k, &tk) in t.iter().enumerate() {
                        poly.coeffs[8 * j + k] = (((tk & 0x7FF) * Q + 1024) >> 11) as i16;
                    }
                }
            }
        }
    }
    Ok(pv)
}

/// Serialize a polynomial vector, 384 bytes per element
pub(crate) fn polyvec_to_bytes<P: KyberParams>(pv: &PolyVec<P>) -> Vec<u8> {
    let mut r = Vec::with_capacity(P::POLYVEC_BYTES);
    for poly in pv.polys.iter() {
        r.extend_from_slice(&poly.to_bytes());
    }
    r
}

/// Deserialize a polynomial vector from K * 384 bytes
pub(crate) fn polyvec_from_bytes<P: KyberParams>(a: &[u8]) -> AlgoResult<PolyVec<P>> {
    if a.len() != P::POLYVEC_BYTES {
        return Err(AlgoError::Length {
            context: "polyvec_from_bytes",
            expected: P::POLYVEC_BYTES,
            actual: a.len(),
        });
    }

    let mut pv = PolyVec::<P>::zero();
    for (i, poly) in pv.polys.iter_mut().enumerate() {
        *poly = Polynomial::from_bytes(&a[i * KYBER_POLY_BYTES..(i + 1) * KYBER_POLY_BYTES])?;
    }
    Ok(pv)
}

/// Pack an IND-CPA public key: polyvec_to_bytes(t) || rho
pub(crate) fn pack_pk<P: KyberParams>(t: &PolyVec<P>, rho: &[u8; KYBER_SYM_BYTES]) -> Vec<u8> {
    let mut packed = polyvec_to_bytes(t);
    packed.extend_from_slice(rho);
    packed
}

/// Unpack an IND-CPA public key into (t, rho)
pub(crate) fn unpack_pk<P: KyberParams>(
    bytes: &[u8],
) -> AlgoResult<(PolyVec<P>, [u8; KYBER_SYM_BYTES])> {
    if bytes.len() != P::PUBLIC_KEY_BYTES {
        return Err(AlgoError::Length {
            context: "unpack_pk",
            expected: P::PUBLIC_KEY_BYTES,
            actual: bytes.len(),
        });
    }

    let t = polyvec_from_bytes::<P>(&bytes[..P::POLYVEC_BYTES])?;
    let mut rho = [0u8; KYBER_SYM_BYTES];
    rho.copy_from_slice(&bytes[P::POLYVEC_BYTES..]);
    Ok((t, rho))
}

/// Pack an IND-CPA secret key: polyvec_to_bytes(s)
pub(crate) fn pack_sk<P: KyberParams>(s: &PolyVec<P>) -> Vec<u8> {
    polyvec_to_bytes(s)
}

/// Unpack an IND-CPA secret key
pub(crate) fn unpack_sk<P: KyberParams>(bytes: &[u8]) -> AlgoResult<PolyVec<P>> {
    polyvec_from_bytes::<P>(bytes)
}

/// Pack a ciphertext: compress_polyvec(u) || compress_poly(v)
pub(crate) fn pack_ciphertext<P: KyberParams>(u: &PolyVec<P>, v: &Polynomial) -> Vec<u8> {
    let mut packed = compress_polyvec(u);
    packed.extend_from_slice(&compress_poly::<P>(v));
    packed
}

/// Unpack a ciphertext into (u, v)
pub(crate) fn unpack_ciphertext<P: KyberParams>(
    bytes: &[u8],
) -> AlgoResult<(PolyVec<P>, Polynomial)> {
    if bytes.len() != P::CIPHERTEXT_BYTES {
        return Err(AlgoError::Length {
            context: "unpack_ciphertext",
            expected: P::CIPHERTEXT_BYTES,
            actual: bytes.len(),
        });
    }

    let u = decompress_polyvec::<P>(&bytes[..P::POLYVEC_COMPRESSED_BYTES])?;
    let v = decompress_poly::<P>(&bytes[P::POLYVEC_COMPRESSED_BYTES..])?;
    Ok((u, v))
}
