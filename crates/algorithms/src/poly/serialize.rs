//! Polynomial coefficient packing and message embedding
//!
//! The 12-bit byte layout here is a wire format: three bytes carry two
//! coefficients, and the grouping must match the reference layout exactly
//! for key and ciphertext interoperability.

use super::polynomial::{Polynomial, KYBER_N};
use super::reduce::Q;
use crate::error::{validate, Result};

pub use qcrypt_params::pqc::kyber::{KYBER_POLY_BYTES, KYBER_SYM_BYTES};

impl Polynomial {
    /// Serialize into 384 bytes, 12 bits per coefficient
    ///
    /// Coefficients are canonicalized with a conditional subtract before
    /// packing, so the output never encodes a value >= q.
    pub fn to_bytes(&self) -> [u8; KYBER_POLY_BYTES] {
        let mut canonical = self.clone();
        canonical.conditional_sub_q();

        let mut r = [0u8; KYBER_POLY_BYTES];
        for i in 0..KYBER_N / 2 {
            let t0 = canonical.coeffs[2 * i] as u16;
            let t1 = canonical.coeffs[2 * i + 1] as u16;
            r[3 * i] = t0 as u8;
            r[3 * i + 1] = ((t0 >> 8) | (t1 << 4)) as u8;
            r[3 * i + 2] = (t1 >> 4) as u8;
        }
        r
    }

    /// Deserialize from 384 bytes
    ///
    /// Values are masked to 12 bits; no range check against q is performed,
    /// matching the reference behavior.
    pub fn from_bytes(a: &[u8]) -> Result<Self> {
        validate::length("Polynomial::from_bytes", a.len(), KYBER_POLY_BYTES)?;

        let mut p = Self::zero();
        for i in 0..KYBER_N / 2 {
            p.coeffs[2 * i] =
                (((a[3 * i] as u16) | ((a[3 * i + 1] as u16) << 8)) & 0xFFF) as i16;
            p.coeffs[2 * i + 1] =
                ((((a[3 * i + 1] as u16) >> 4) | ((a[3 * i + 2] as u16) << 4)) & 0xFFF) as i16;
        }
        Ok(p)
    }

    /// Embed a 32-byte message, one bit per coefficient
    ///
    /// A set bit becomes round(q/2), a clear bit becomes 0. The mask is a
    /// branchless sign-extension of the bit.
    pub fn from_message(msg: &[u8; KYBER_SYM_BYTES]) -> Self {
        let mut p = Self::zero();
        for i in 0..KYBER_N / 8 {
            for j in 0..8 {
                let mask = ((msg[i] as i16 >> j) & 1).wrapping_neg();
                p.coeffs[8 * i + j] = mask & ((Q + 1) / 2);
            }
        }
        p
    }

    /// Round each coefficient to the nearer of {0, q/2} and repack to bits
    pub fn to_message(&self) -> [u8; KYBER_SYM_BYTES] {
        let mut canonical = self.clone();
        canonical.conditional_sub_q();

        let mut msg = [0u8; KYBER_SYM_BYTES];
        for i in 0..KYBER_N / 8 {
            for j in 0..8 {
                let t = ((((canonical.coeffs[8 * i + j] as i32) << 1) + (Q as i32) / 2)
                    / (Q as i32))
                    & 1;
                msg[i] |= (t as u8) << j;
            }
        }
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_round_trip_is_identity_for_canonical_polys() {
        let mut p = Polynomial::zero();
        for i in 0..KYBER_N {
            p.coeffs[i] = ((i as i16) * 13 + 7) % Q;
        }
        let packed = p.to_bytes();
        let unpacked = Polynomial::from_bytes(&packed).unwrap();
        assert_eq!(unpacked, p);
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        assert!(Polynomial::from_bytes(&[0u8; KYBER_POLY_BYTES - 1]).is_err());
        assert!(Polynomial::from_bytes(&[0u8; KYBER_POLY_BYTES + 1]).is_err());
    }

    #[test]
    fn message_round_trip() {
        let mut msg = [0u8; KYBER_SYM_BYTES];
        for (i, b) in msg.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37) ^ 0x5A;
        }
        let p = Polynomial::from_message(&msg);
        assert_eq!(p.to_message(), msg);
    }

    #[test]
    fn message_bits_map_to_halfway_point() {
        let mut msg = [0u8; KYBER_SYM_BYTES];
        msg[0] = 0b0000_0101;
        let p = Polynomial::from_message(&msg);
        assert_eq!(p.coeffs[0], (Q + 1) / 2);
        assert_eq!(p.coeffs[1], 0);
        assert_eq!(p.coeffs[2], (Q + 1) / 2);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn packing_round_trips_any_canonical_poly(
                coeffs in proptest::collection::vec(0i16..Q, KYBER_N)
            ) {
                let p = Polynomial::from_coeffs(&coeffs).unwrap();
                let unpacked = Polynomial::from_bytes(&p.to_bytes()).unwrap();
                prop_assert_eq!(unpacked, p);
            }

            #[test]
            fn message_embedding_round_trips(msg in proptest::array::uniform32(any::<u8>())) {
                let p = Polynomial::from_message(&msg);
                prop_assert_eq!(p.to_message(), msg);
            }
        }
    }
}
