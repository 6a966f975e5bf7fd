//! Kyber Key Encapsulation Mechanism
//!
//! This crate implements the Kyber lattice-based KEM (IND-CCA2 via a
//! Fujisaki-Okamoto transform with implicit rejection) at the 512, 768
//! and 1024 security levels, plus a small key-agreement session type that
//! drives one encapsulate/decapsulate exchange between two parties.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod error;
pub mod kyber;

// Re-exports
pub use kyber::{Kyber1024, Kyber512, Kyber768};
pub use kyber::{KyberCiphertext, KyberPublicKey, KyberSecretKey, KyberSharedSecret};

// The public trait surface, for downstream convenience
pub use qcrypt_api as api;
