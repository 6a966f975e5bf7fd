//! SHAKE extendable output functions
//!
//! This module implements SHAKE-128 and SHAKE-256 (FIPS PUB 202) with an
//! incremental absorb/squeeze interface. The squeeze side is resumable:
//! the matrix rejection sampler pulls one rate-sized block at a time until
//! it has enough accepted coefficients.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ExtendableOutputFunction;
use crate::error::{validate, Error, Result};
use crate::hash::sha3::keccak_f1600;

// Import security types from qcrypt-common
use qcrypt_common::security::{barrier, SecretBuffer, SecureZeroingType};

// SHAKE constants
const KECCAK_STATE_SIZE: usize = 25; // 5x5 of 64-bit words

// SHAKE rates (in bytes): r = 1600 - 2*security_level
pub use qcrypt_params::utils::hash::{SHAKE128_RATE, SHAKE256_RATE};

// Helper struct for secure Keccak state operations
#[derive(Clone, Zeroize)]
struct SecureKeccakState {
    state: SecretBuffer<200>, // 25 * 8 bytes
}

impl SecureKeccakState {
    fn new() -> Self {
        Self {
            state: SecretBuffer::zeroed(),
        }
    }

    fn from_u64_array(array: [u64; KECCAK_STATE_SIZE]) -> Self {
        let mut bytes = [0u8; 200];
        for (i, &word) in array.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&word.to_le_bytes());
        }
        Self {
            state: SecretBuffer::new(bytes),
        }
    }

    fn to_u64_array(&self) -> [u64; KECCAK_STATE_SIZE] {
        let mut array = [0u64; KECCAK_STATE_SIZE];
        let bytes = self.state.as_ref();
        for (i, word) in array.iter_mut().enumerate() {
            let start = i * 8;
            let mut lane = [0u8; 8];
            lane.copy_from_slice(&bytes[start..start + 8]);
            *word = u64::from_le_bytes(lane);
        }
        array
    }

    fn apply_permutation(&mut self) {
        let mut state_array = self.to_u64_array();
        keccak_f1600(&mut state_array);
        *self = Self::from_u64_array(state_array);
        state_array.zeroize();
    }
}

impl SecureZeroingType for SecureKeccakState {
    fn zeroed() -> Self {
        Self::new()
    }

    fn secure_clone(&self) -> Self {
        Self {
            state: self.state.secure_clone(),
        }
    }
}

/// Absorbs exactly one rate-sized block into the sponge state
fn keccak_absorb_block(state: &mut SecureKeccakState, block: &[u8]) {
    let mut state_array = state.to_u64_array();

    for (i, &byte) in block.iter().enumerate() {
        let word_idx = i / 8;
        let byte_idx = i % 8;
        state_array[word_idx] ^= (byte as u64) << (8 * byte_idx);
    }
    keccak_f1600(&mut state_array);

    *state = SecureKeccakState::from_u64_array(state_array);
    state_array.zeroize();
}

macro_rules! impl_shake_xof {
    ($name:ident, $rate:expr, $level:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, ZeroizeOnDrop)]
        pub struct $name {
            state: SecureKeccakState,
            buffer: SecretBuffer<{ $rate }>,
            buffer_idx: usize,
            is_finalized: bool,
            squeezing: bool,
        }

        impl Zeroize for $name {
            fn zeroize(&mut self) {
                self.state.zeroize();
                self.buffer.zeroize();
                self.buffer_idx.zeroize();
                self.is_finalized = false;
                self.squeezing = false;
            }
        }

        impl $name {
            fn init() -> Self {
                $name {
                    state: SecureKeccakState::new(),
                    buffer: SecretBuffer::zeroed(),
                    buffer_idx: 0,
                    is_finalized: false,
                    squeezing: false,
                }
            }
        }

        impl ExtendableOutputFunction for $name {
            fn new() -> Self {
                Self::init()
            }

            fn update(&mut self, data: &[u8]) -> Result<()> {
                if self.is_finalized {
                    return Err(Error::xof_finalized());
                }
                if self.squeezing {
                    return Err(Error::xof_squeezing());
                }

                let mut idx = 0;
                if self.buffer_idx > 0 {
                    let to_copy = ($rate - self.buffer_idx).min(data.len());
                    self.buffer.as_mut()[self.buffer_idx..self.buffer_idx + to_copy]
                        .copy_from_slice(&data[..to_copy]);
                    self.buffer_idx += to_copy;
                    idx = to_copy;

                    if self.buffer_idx == $rate {
                        keccak_absorb_block(&mut self.state, self.buffer.as_ref());
                        self.buffer_idx = 0;
                    }
                }

                let remaining = data.len() - idx;
                let full_blocks = remaining / $rate;
                for i in 0..full_blocks {
                    let start = idx + i * $rate;
                    keccak_absorb_block(&mut self.state, &data[start..start + $rate]);
                }
                idx += full_blocks * $rate;

                if idx < data.len() {
                    let rem = data.len() - idx;
                    self.buffer.as_mut()[..rem].copy_from_slice(&data[idx..]);
                    self.buffer_idx = rem;
                }

                Ok(())
            }

            fn finalize(&mut self) -> Result<()> {
                if self.is_finalized {
                    return Ok(());
                }

                // Pad the final partial block with the SHAKE domain bits
                let mut pad_block = SecretBuffer::<{ $rate }>::zeroed();
                pad_block.as_mut()[..self.buffer_idx]
                    .copy_from_slice(&self.buffer.as_ref()[..self.buffer_idx]);
                pad_block.as_mut()[self.buffer_idx] ^= 0x1F;
                pad_block.as_mut()[$rate - 1] ^= 0x80;

                keccak_absorb_block(&mut self.state, pad_block.as_ref());

                self.is_finalized = true;
                self.buffer_idx = 0;
                Ok(())
            }

            fn squeeze(&mut self, output: &mut [u8]) -> Result<()> {
                validate::parameter(
                    !output.is_empty(),
                    "output_length",
                    "Output buffer must not be empty",
                )?;

                if !self.is_finalized {
                    self.finalize()?;
                }
                if !self.squeezing {
                    // First squeeze reads from the freshly padded state
                    self.squeezing = true;
                    self.extract_block();
                    self.buffer_idx = 0;
                }

                let mut offset = 0;
                while offset < output.len() {
                    if self.buffer_idx == $rate {
                        self.state.apply_permutation();
                        self.extract_block();
                        self.buffer_idx = 0;
                    }

                    let available = $rate - self.buffer_idx;
                    let needed = output.len() - offset;
                    let to_copy = available.min(needed);

                    output[offset..offset + to_copy].copy_from_slice(
                        &self.buffer.as_ref()[self.buffer_idx..self.buffer_idx + to_copy],
                    );

                    offset += to_copy;
                    self.buffer_idx += to_copy;
                }

                barrier::compiler_fence_seq_cst();
                Ok(())
            }

            fn squeeze_into_vec(&mut self, len: usize) -> Result<Vec<u8>> {
                validate::parameter(
                    len > 0,
                    "output_length",
                    "Output length must be greater than 0",
                )?;

                let mut v = vec![0u8; len];
                self.squeeze(&mut v)?;
                Ok(v)
            }

            fn reset(&mut self) -> Result<()> {
                *self = Self::new();
                Ok(())
            }

            fn security_level() -> usize {
                $level
            }
        }

        impl $name {
            /// Copy the current rate-portion of the state into the output buffer
            fn extract_block(&mut self) {
                let state_array = self.state.to_u64_array();
                let buffer_mut = self.buffer.as_mut();

                for i in 0..($rate / 8) {
                    buffer_mut[i * 8..(i + 1) * 8].copy_from_slice(&state_array[i].to_le_bytes());
                }
            }
        }
    };
}

impl_shake_xof!(
    ShakeXof128,
    SHAKE128_RATE,
    128,
    "SHAKE-128 extendable output function with secure memory handling"
);
impl_shake_xof!(
    ShakeXof256,
    SHAKE256_RATE,
    256,
    "SHAKE-256 extendable output function with secure memory handling"
);
