//! The 256-coefficient Kyber polynomial with in-ring arithmetic

use super::ntt;
use super::reduce::{barrett_reduce, csubq, montgomery_reduce};
use crate::error::{Error, Result};
use zeroize::Zeroize;

pub use qcrypt_params::pqc::kyber::KYBER_N;
pub use qcrypt_params::pqc::kyber::KYBER_Q;

/// R^2 mod q; multiplying by this inside a Montgomery reduction converts a
/// coefficient into the Montgomery domain
const MONT_R2: i32 = 1353;

/// A polynomial in Z_q[x]/(x^256 + 1)
///
/// Whether the coefficients are in the normal or the NTT domain is tracked
/// by the caller; the two representations share this storage type.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Polynomial {
    /// The 256 signed coefficients
    pub coeffs: [i16; KYBER_N],
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Polynomial({:?}...)", &self.coeffs[..8])
    }
}

impl Polynomial {
    /// Creates a new polynomial with all coefficients set to zero
    pub fn zero() -> Self {
        Self {
            coeffs: [0i16; KYBER_N],
        }
    }

    /// Creates a polynomial from a slice of coefficients
    pub fn from_coeffs(coeffs_slice: &[i16]) -> Result<Self> {
        if coeffs_slice.len() != KYBER_N {
            return Err(Error::Parameter {
                name: "coeffs_slice".into(),
                reason: "Incorrect number of coefficients for polynomial degree N".into(),
            });
        }

        let mut coeffs = [0i16; KYBER_N];
        coeffs.copy_from_slice(coeffs_slice);
        Ok(Self { coeffs })
    }

    /// Coefficient-wise addition (no reduction)
    pub fn add(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..KYBER_N {
            r.coeffs[i] = self.coeffs[i].wrapping_add(other.coeffs[i]);
        }
        r
    }

    /// Coefficient-wise subtraction (no reduction)
    pub fn sub(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..KYBER_N {
            r.coeffs[i] = self.coeffs[i].wrapping_sub(other.coeffs[i]);
        }
        r
    }

    /// Coefficient-wise addition in place
    pub fn add_assign(&mut self, other: &Self) {
        for i in 0..KYBER_N {
            self.coeffs[i] = self.coeffs[i].wrapping_add(other.coeffs[i]);
        }
    }

    /// Barrett-reduce every coefficient
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = barrett_reduce(*c);
        }
    }

    /// Conditionally subtract q from every coefficient, mapping [0, 2q) to [0, q)
    pub fn conditional_sub_q(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = csubq(*c);
        }
    }

    /// Multiply every coefficient by the Montgomery factor R = 2^16
    pub fn to_mont(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = montgomery_reduce((*c as i32) * MONT_R2);
        }
    }

    /// In-place forward NTT: normal order in, bit-reversed order out
    pub fn ntt_inplace(&mut self) {
        ntt::ntt(&mut self.coeffs);
    }

    /// In-place inverse NTT: bit-reversed order in, normal order out,
    /// scaled by the Montgomery factor
    pub fn from_ntt_inplace(&mut self) {
        ntt::inv_ntt(&mut self.coeffs);
    }

    /// Pointwise multiplication of two NTT-domain polynomials
    ///
    /// Works on groups of 4 coefficients: two degree-1 multiplications
    /// modulo x^2 - zeta and x^2 + zeta with the twiddle at 64 + group.
    pub fn ntt_mul(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..KYBER_N / 4 {
            let zeta = ntt::ZETAS[64 + i];
            let (r0, r1) = ntt::basemul(
                self.coeffs[4 * i],
                self.coeffs[4 * i + 1],
                other.coeffs[4 * i],
                other.coeffs[4 * i + 1],
                zeta,
            );
            let (r2, r3) = ntt::basemul(
                self.coeffs[4 * i + 2],
                self.coeffs[4 * i + 3],
                other.coeffs[4 * i + 2],
                other.coeffs[4 * i + 3],
                zeta.wrapping_neg(),
            );
            r.coeffs[4 * i] = r0;
            r.coeffs[4 * i + 1] = r1;
            r.coeffs[4 * i + 2] = r2;
            r.coeffs[4 * i + 3] = r3;
        }
        r
    }

    /// View the coefficients as a slice
    pub fn as_coeffs_slice(&self) -> &[i16] {
        &self.coeffs
    }
}
