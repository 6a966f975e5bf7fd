//! Kyber Key Encapsulation Mechanism (KEM).
//!
//! This module implements Kyber, a lattice-based key encapsulation
//! mechanism. The CCA2-secure layer (`ind_cca`) wraps the CPA-secure
//! public-key encryption primitive (`cpa_pke`) in a Fujisaki-Okamoto
//! transform with implicit rejection.

// Modules defining the Kyber KEM logic and parameters.
mod params;
mod polyvec; // Defines PolyVec and its operations
mod serialize; // Packing, compression and format validation
mod cpa_pke; // The core CPA-secure PKE scheme
mod ind_cca; // The Fujisaki-Okamoto transform for CCA security
mod kem; // The KyberKem struct and its api::Kem impl
mod session; // One-exchange key-agreement session

// Concrete Kyber variants
mod kyber1024;
mod kyber512;
mod kyber768;

// Re-export the primary KEM types for each security level.
pub use self::kyber1024::Kyber1024;
pub use self::kyber512::Kyber512;
pub use self::kyber768::Kyber768;

// Re-export common key/ciphertext types if users need to name them directly.
// These are shared across the KyberParams variants; users usually interact
// via the associated types of Kyber512, Kyber768, Kyber1024.
pub use self::kem::{KyberCiphertext, KyberKem, KyberPublicKey, KyberSecretKey, KyberSharedSecret};

// Parameter-set plumbing
pub use self::params::{
    Kyber1024ParamsImpl, Kyber512ParamsImpl, Kyber768ParamsImpl, KyberParams, SecurityLevel,
    KYBER_SS_BYTES,
};

// The session type for init -> exchange key agreement
pub use self::session::{CompletedExchange, KyberExchange};

#[cfg(test)]
mod tests;
