//! Cryptographic primitives library with constant-time implementations
//!
//! This crate provides the primitives the qcrypt KEM is built from: the
//! Keccak-based hash and extendable-output functions, and the arithmetic of
//! the polynomial ring Z_q[x]/(x^256+1) with q = 3329 (modular reduction,
//! the number-theoretic transform, noise sampling and serialization).
//! The library is designed to be usable in both `std` and `no_std`
//! environments.
//!
//! # Security Features
//!
//! This library implements security patterns to protect sensitive
//! cryptographic material, including:
//!
//! - Secure memory handling with automatic zeroization
//! - Constant-time comparison operations
//! - Branchless reduction and masking idioms in the ring arithmetic

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Hash function implementations
pub mod hash;
pub use hash::{Sha3_256, Sha3_512};

// Extendable output functions
#[cfg(feature = "alloc")]
pub mod xof;
#[cfg(feature = "alloc")]
pub use xof::{ExtendableOutputFunction, ShakeXof128, ShakeXof256};

// Polynomial ring arithmetic
pub mod poly;
pub use poly::polynomial::Polynomial;

// Type system
pub mod types;
pub use types::Digest;

// Re-export security types from qcrypt-common
pub use qcrypt_common::security::{
    barrier, EphemeralSecret, SecretBuffer, SecureZeroingType, ZeroizeGuard,
};
