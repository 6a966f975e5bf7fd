//! Extendable Output Functions (XOF)
//!
//! This module implements the SHAKE family of extendable output functions
//! as specified in FIPS PUB 202. SHAKE-128 drives the public-matrix
//! rejection sampler; SHAKE-256 is the noise PRF and the shared-secret KDF.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

#[cfg(feature = "std")]
use std::vec::Vec;

use crate::error::{validate, Error, Result};

pub mod shake;

// Re-exports
pub use shake::{ShakeXof128, ShakeXof256};

/// Trait for extendable output functions
pub trait ExtendableOutputFunction {
    /// Creates a new instance of the XOF
    fn new() -> Self;

    /// Updates the XOF state with new data
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Finalizes the XOF state for output
    fn finalize(&mut self) -> Result<()>;

    /// Squeezes output bytes into the provided buffer
    ///
    /// May be called repeatedly; each call continues the output stream
    /// where the previous one stopped.
    fn squeeze(&mut self, output: &mut [u8]) -> Result<()>;

    /// Squeezes the specified number of output bytes into a new vector
    fn squeeze_into_vec(&mut self, len: usize) -> Result<Vec<u8>>;

    /// Resets the XOF state
    fn reset(&mut self) -> Result<()>;

    /// Returns the security level in bits
    fn security_level() -> usize;

    /// Convenience method to generate output in a single call
    fn generate(data: &[u8], len: usize) -> Result<Vec<u8>>
    where
        Self: Sized,
    {
        validate::parameter(
            len > 0,
            "output_length",
            "XOF output length must be greater than 0",
        )?;

        let mut xof = Self::new();
        xof.update(data)?;
        xof.squeeze_into_vec(len)
    }
}

/// Trait for XOF algorithms with compile-time guarantees
pub trait XofAlgorithm {
    /// Security level in bits
    const SECURITY_LEVEL: usize;

    /// Minimum recommended output size in bytes
    const MIN_OUTPUT_SIZE: usize;

    /// Algorithm identifier
    const ALGORITHM_ID: &'static str;

    /// Algorithm name
    fn name() -> &'static str {
        Self::ALGORITHM_ID
    }
}

/// Type-level constants for SHAKE-128
pub enum Shake128Algorithm {}

impl XofAlgorithm for Shake128Algorithm {
    const SECURITY_LEVEL: usize = 128;
    const MIN_OUTPUT_SIZE: usize = 16; // 128 bits
    const ALGORITHM_ID: &'static str = "SHAKE-128";
}

/// Type-level constants for SHAKE-256
pub enum Shake256Algorithm {}

impl XofAlgorithm for Shake256Algorithm {
    const SECURITY_LEVEL: usize = 256;
    const MIN_OUTPUT_SIZE: usize = 32; // 256 bits
    const ALGORITHM_ID: &'static str = "SHAKE-256";
}

// Error conversion helpers for XOF-specific errors
impl Error {
    /// Create an XOF finalization error
    pub(crate) fn xof_finalized() -> Self {
        Error::Processing {
            operation: "XOF",
            details: "Cannot update after finalization",
        }
    }

    /// Create an XOF squeezing error
    pub(crate) fn xof_squeezing() -> Self {
        Error::Processing {
            operation: "XOF",
            details: "Cannot update after squeezing has begun",
        }
    }
}
