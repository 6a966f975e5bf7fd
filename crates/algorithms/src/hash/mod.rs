//! Cryptographic hash functions
//!
//! This module provides the fixed-output hash functions used by the KEM
//! construction: SHA3-256 and SHA3-512 (FIPS 202). Variable-length output
//! lives in the [`crate::xof`] module instead.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::error::Result;

pub mod sha3;

pub use sha3::{Sha3_256, Sha3_512};

/// Raw hash output as a byte vector
#[cfg(feature = "alloc")]
pub type Hash = Vec<u8>;

/// Trait for hash algorithm marker types with compile-time constants
pub trait HashAlgorithm {
    /// Digest size in bytes
    const OUTPUT_SIZE: usize;
    /// Internal block (rate) size in bytes
    const BLOCK_SIZE: usize;
    /// Human-readable algorithm identifier
    const ALGORITHM_ID: &'static str;
}

/// Trait for streaming hash function engines
pub trait HashFunction {
    /// Marker type carrying the algorithm constants
    type Algorithm: HashAlgorithm;
    /// Digest output type
    type Output;

    /// Create a fresh engine
    fn new() -> Self;

    /// Absorb more input data
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Finalize and produce the digest, resetting the engine state
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Digest size in bytes
    fn output_size() -> usize {
        <Self::Algorithm as HashAlgorithm>::OUTPUT_SIZE
    }

    /// Internal block size in bytes
    fn block_size() -> usize {
        <Self::Algorithm as HashAlgorithm>::BLOCK_SIZE
    }

    /// Algorithm name
    #[cfg(feature = "alloc")]
    fn name() -> String {
        <Self::Algorithm as HashAlgorithm>::ALGORITHM_ID.to_string()
    }

    /// One-shot convenience: hash `data` in a single call
    fn digest(data: &[u8]) -> Result<Self::Output>
    where
        Self: Sized,
    {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }
}
