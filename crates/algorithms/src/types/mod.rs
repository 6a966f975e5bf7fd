//! Type-safe wrappers for cryptographic types
//!
//! This module provides domain-specific types with compile-time and runtime
//! guarantees for cryptographic operations, designed to be ergonomic while
//! preventing common mistakes.

// Submodules
pub mod digest;

// Re-export main types
pub use digest::Digest;

// Import and re-export core types
pub use qcrypt_api::types::SecretBytes;

// Import and re-export security types from qcrypt-common
pub use qcrypt_common::security::{
    EphemeralSecret, SecretBuffer, SecureZeroingType, ZeroizeGuard,
};
