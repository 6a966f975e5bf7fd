//! # qcrypt
//!
//! A pure Rust implementation of the Kyber lattice-based key encapsulation
//! mechanism (KEM) at the 512, 768 and 1024 security levels.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qcrypt = "0.4"
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`qcrypt-algorithms`]: Keccak-based hashing/XOFs and polynomial-ring arithmetic
//! - [`qcrypt-kem`]: The Kyber KEM (IND-CCA2) and the key-agreement session type
//!
//! ## Example
//!
//! ```
//! use qcrypt::prelude::*;
//!
//! let mut rng = rand::rngs::OsRng;
//! let keypair = Kyber768::keypair(&mut rng).unwrap();
//! let pk = Kyber768::public_key(&keypair);
//! let sk = Kyber768::secret_key(&keypair);
//!
//! let (ct, ss_sender) = Kyber768::encapsulate(&mut rng, &pk).unwrap();
//! let ss_receiver = Kyber768::decapsulate(&sk, &ct).unwrap();
//! assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use qcrypt_api as api;
pub use qcrypt_common as common;
pub use qcrypt_internal as internal;
pub use qcrypt_params as params;

// Feature-gated re-exports
#[cfg(feature = "algorithms")]
pub use qcrypt_algorithms as algorithms;

#[cfg(feature = "kem")]
pub use qcrypt_kem as kem;

// Re-export external crates users are likely to need alongside the KEM
pub use subtle;
pub use zeroize;

#[cfg(feature = "rand")]
pub use rand;

/// Common imports for qcrypt users
pub mod prelude {
    pub use qcrypt_api::{Kem, Serialize, SerializeSecret};

    #[cfg(feature = "kem")]
    pub use qcrypt_kem::{Kyber1024, Kyber512, Kyber768};

    #[cfg(feature = "kem")]
    pub use qcrypt_kem::kyber::SecurityLevel;
}
