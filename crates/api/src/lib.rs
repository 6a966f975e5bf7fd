//! Public API traits and types for the qcrypt library
//!
//! This crate provides the public API surface for the qcrypt ecosystem:
//! the [`Kem`] trait, serialization contracts, error types, and the
//! `SecretBytes` container used for shared secrets.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use types::*;

// Re-export all traits from the traits module
pub use traits::{Kem, Serialize, SerializeSecret};

// Re-export trait modules for direct access
pub use traits::{kem, serialize};
