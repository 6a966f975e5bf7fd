//! Scalar modular-arithmetic primitives for the Kyber field
//!
//! All coefficient arithmetic funnels through the three reductions here.
//! `conditional_sub_q` is deliberately branchless; rewriting it with an
//! `if` would reopen the timing channel it exists to close.

use qcrypt_params::pqc::kyber::{KYBER_Q, KYBER_QINV};

/// The field modulus as a signed 16-bit value
pub const Q: i16 = KYBER_Q as i16;

/// Montgomery reduction: given `a` with |a| < q * 2^15, returns
/// `a * R^-1 mod q` in (-q, q) where R = 2^16.
#[inline(always)]
pub fn montgomery_reduce(a: i32) -> i16 {
    let u = (a as i16).wrapping_mul(KYBER_QINV as i16);
    let t = (u as i32) * (Q as i32);
    ((a.wrapping_sub(t)) >> 16) as i16
}

/// Multiply two field elements and Montgomery-reduce the product
#[inline(always)]
pub fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}

/// Barrett reduction: returns a canonical small representative congruent
/// to `a mod q`, using the fixed-point approximation v = ⌊(2^26 + q/2)/q⌋.
#[inline(always)]
pub fn barrett_reduce(a: i16) -> i16 {
    const V: i32 = ((1i32 << 26) + (Q as i32) / 2) / (Q as i32);
    let t = ((V * (a as i32)) >> 26) as i16;
    a.wrapping_sub(t.wrapping_mul(Q))
}

/// Conditionally subtract q once, branchlessly: maps [0, 2q) onto [0, q).
#[inline(always)]
pub fn csubq(a: i16) -> i16 {
    let mut a = a.wrapping_sub(Q);
    a = a.wrapping_add((a >> 15) & Q);
    a
}
