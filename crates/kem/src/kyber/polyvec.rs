//! Polynomial vector operations for Kyber.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use qcrypt_algorithms::poly::polynomial::Polynomial;
use zeroize::Zeroize;

use super::params::KyberParams;

/// A vector of K polynomials.
///
/// The same domain-state discipline as [`Polynomial`] applies element-wise:
/// either every element is in the normal domain or every element is in the
/// NTT domain.
#[derive(Debug, PartialEq, Eq)]
pub struct PolyVec<P: KyberParams> {
    /// The polynomials in this vector.
    pub(crate) polys: Vec<Polynomial>,
    _params: core::marker::PhantomData<P>,
}

impl<P: KyberParams> Zeroize for PolyVec<P> {
    fn zeroize(&mut self) {
        for p in self.polys.iter_mut() {
            p.zeroize();
        }
    }
}

impl<P: KyberParams> Clone for PolyVec<P> {
    fn clone(&self) -> Self {
        Self {
            polys: self.polys.clone(),
            _params: core::marker::PhantomData,
        }
    }
}

impl<P: KyberParams> PolyVec<P> {
    /// Creates a new zero PolyVec of dimension K.
    pub fn zero() -> Self {
        Self {
            polys: vec![Polynomial::zero(); P::K],
            _params: core::marker::PhantomData,
        }
    }

    /// Returns the dimension K of this PolyVec.
    pub fn dimension() -> usize {
        P::K
    }

    /// Applies the forward NTT to each polynomial in the vector.
    pub fn ntt_inplace(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt_inplace();
        }
    }

    /// Applies the inverse NTT to each polynomial in the vector.
    pub fn inv_ntt_inplace(&mut self) {
        for p in self.polys.iter_mut() {
            p.from_ntt_inplace();
        }
    }

    /// Barrett-reduces every coefficient of every element.
    pub fn reduce(&mut self) {
        for p in self.polys.iter_mut() {
            p.reduce();
        }
    }

    /// Applies the conditional subtraction of q to every coefficient of
    /// every element.
    pub fn conditional_sub_q(&mut self) {
        for p in self.polys.iter_mut() {
            p.conditional_sub_q();
        }
    }

    /// Computes the NTT-domain dot product of two PolyVecs.
    ///
    /// Multiplies element-wise with `ntt_mul`, accumulates, and
    /// Barrett-reduces the result. Both inputs must be in the NTT domain.
    pub fn pointwise_accum(&self, other: &Self) -> Polynomial {
        let mut acc = self.polys[0].ntt_mul(&other.polys[0]);
        for (p1, p2) in self.polys.iter().zip(other.polys.iter()).skip(1) {
            let prod = p1.ntt_mul(p2);
            acc.add_assign(&prod);
        }
        acc.reduce();
        acc
    }

    /// Adds another PolyVec to this one, coefficient-wise.
    pub fn add_assign(&mut self, other: &Self) {
        for (p1, p2) in self.polys.iter_mut().zip(other.polys.iter()) {
            p1.add_assign(p2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyber::params::Kyber768ParamsImpl;

    type Pv = PolyVec<Kyber768ParamsImpl>;

    #[test]
    fn zero_has_dimension_k() {
        let pv = Pv::zero();
        assert_eq!(pv.polys.len(), 3);
        assert_eq!(Pv::dimension(), 3);
    }

    #[test]
    fn add_assign_is_coefficientwise() {
        let mut a = Pv::zero();
        let mut b = Pv::zero();
        a.polys[0].coeffs[0] = 5;
        a.polys[2].coeffs[255] = 7;
        b.polys[0].coeffs[0] = 11;
        b.polys[2].coeffs[255] = 13;
        a.add_assign(&b);
        assert_eq!(a.polys[0].coeffs[0], 16);
        assert_eq!(a.polys[2].coeffs[255], 20);
        assert_eq!(a.polys[1].coeffs[100], 0);
    }
}
