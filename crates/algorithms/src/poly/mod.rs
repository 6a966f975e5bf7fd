//! Polynomial Engine for the ring Z_q[x]/(x^256 + 1), q = 3329
//!
//! This module provides the arithmetic core of the KEM: scalar modular
//! reduction primitives, the negacyclic number-theoretic transform, the
//! 256-coefficient polynomial type with its serialization, and the
//! centered-binomial / uniform-rejection samplers.
//!
//! Coefficients are signed 16-bit integers. A polynomial is either in the
//! *normal* domain (coefficient i belongs to x^i) or in the *NTT* domain
//! (bit-reversed, frequency order); the two are never mixed without an
//! explicit transform call.

pub mod ntt;
pub mod polynomial;
pub mod reduce;
pub mod sampling;
pub mod serialize;

/// Prelude for easy importing of common polynomial types and functions.
pub mod prelude {
    pub use super::ntt::{basemul, inv_ntt, ntt, ZETAS, ZETAS_INV};
    pub use super::polynomial::{Polynomial, KYBER_N, KYBER_Q};
    pub use super::reduce::{barrett_reduce, csubq, fqmul, montgomery_reduce};
    pub use super::sampling::{cbd_eta2, cbd_eta3, reject_uniform};
}
