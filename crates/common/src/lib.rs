//! Shared security primitives for the qcrypt library
//!
//! This crate provides the memory-hygiene building blocks used across the
//! qcrypt components: zeroize-on-drop buffers for key material and sponge
//! state, ephemeral wrappers for intermediate secrets, and compiler-fence
//! helpers that keep the optimizer from eliding secret-dependent stores.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod security;

// Re-export core security types
pub use security::{EphemeralSecret, SecretBuffer, SecureZeroingType, ZeroizeGuard};

// Conditionally re-export SecretVec only when alloc feature is enabled
#[cfg(feature = "alloc")]
pub use security::secret::SecretVec;

// Re-export memory barrier utilities
pub use security::barrier;
