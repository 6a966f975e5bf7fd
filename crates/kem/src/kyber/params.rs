//! Kyber parameter definitions.

use qcrypt_params::pqc::kyber as global_params;

/// Common Kyber polynomial degree.
pub const KYBER_N: usize = global_params::KYBER_N;
/// Common Kyber coefficient modulus.
pub const KYBER_Q: u16 = global_params::KYBER_Q;
/// Shared secret size for all Kyber variants.
pub const KYBER_SS_BYTES: usize = global_params::KYBER_SS_BYTES;
/// Seed/message size shared by all variants.
pub const KYBER_SYM_BYTES: usize = global_params::KYBER_SYM_BYTES;
/// Packed size of one polynomial.
pub const KYBER_POLY_BYTES: usize = global_params::KYBER_POLY_BYTES;

/// Trait defining parameters for a specific Kyber variant.
pub trait KyberParams: Send + Sync + 'static {
    /// Security parameter k (dimension of vectors/matrices).
    const K: usize;
    /// Noise parameter eta1 for the secret vector s and error vector e.
    const ETA1: u8;
    /// Noise parameter eta2 for the encryption noise e1, e2.
    const ETA2: u8;
    /// Compression bits for vector u (part of ciphertext).
    const DU: usize;
    /// Compression bits for polynomial v (part of ciphertext).
    const DV: usize;

    /// Algorithm name string.
    const NAME: &'static str;
    /// Size of the public key in bytes.
    const PUBLIC_KEY_BYTES: usize;
    /// Size of the secret key in bytes.
    const SECRET_KEY_BYTES: usize;
    /// Size of the ciphertext in bytes.
    const CIPHERTEXT_BYTES: usize;

    /// Size of the packed secret polynomial vector in bytes.
    const POLYVEC_BYTES: usize = Self::K * KYBER_POLY_BYTES;
    /// Size of the compressed ciphertext vector u in bytes.
    const POLYVEC_COMPRESSED_BYTES: usize = Self::K * KYBER_N * Self::DU / 8;
    /// Size of the compressed ciphertext polynomial v in bytes.
    const POLY_COMPRESSED_BYTES: usize = KYBER_N * Self::DV / 8;

    /// Security level tag for this variant.
    const LEVEL: SecurityLevel;
}

// Concrete parameter implementations for Kyber variants.

#[derive(Debug, PartialEq, Eq)]
pub struct Kyber512ParamsImpl;
impl KyberParams for Kyber512ParamsImpl {
    const K: usize = global_params::KYBER512.k;
    const ETA1: u8 = global_params::KYBER512.eta1;
    const ETA2: u8 = global_params::KYBER512.eta2;
    const DU: usize = global_params::KYBER512.du;
    const DV: usize = global_params::KYBER512.dv;
    const NAME: &'static str = "Kyber-512";
    const PUBLIC_KEY_BYTES: usize = global_params::KYBER512.public_key_size;
    const SECRET_KEY_BYTES: usize = global_params::KYBER512.secret_key_size;
    const CIPHERTEXT_BYTES: usize = global_params::KYBER512.ciphertext_size;
    const LEVEL: SecurityLevel = SecurityLevel::Level512;
}

#[derive(Debug, PartialEq, Eq)]
pub struct Kyber768ParamsImpl;
impl KyberParams for Kyber768ParamsImpl {
    const K: usize = global_params::KYBER768.k;
    const ETA1: u8 = global_params::KYBER768.eta1;
    const ETA2: u8 = global_params::KYBER768.eta2;
    const DU: usize = global_params::KYBER768.du;
    const DV: usize = global_params::KYBER768.dv;
    const NAME: &'static str = "Kyber-768";
    const PUBLIC_KEY_BYTES: usize = global_params::KYBER768.public_key_size;
    const SECRET_KEY_BYTES: usize = global_params::KYBER768.secret_key_size;
    const CIPHERTEXT_BYTES: usize = global_params::KYBER768.ciphertext_size;
    const LEVEL: SecurityLevel = SecurityLevel::Level768;
}

#[derive(Debug, PartialEq, Eq)]
pub struct Kyber1024ParamsImpl;
impl KyberParams for Kyber1024ParamsImpl {
    const K: usize = global_params::KYBER1024.k;
    const ETA1: u8 = global_params::KYBER1024.eta1;
    const ETA2: u8 = global_params::KYBER1024.eta2;
    const DU: usize = global_params::KYBER1024.du;
    const DV: usize = global_params::KYBER1024.dv;
    const NAME: &'static str = "Kyber-1024";
    const PUBLIC_KEY_BYTES: usize = global_params::KYBER1024.public_key_size;
    const SECRET_KEY_BYTES: usize = global_params::KYBER1024.secret_key_size;
    const CIPHERTEXT_BYTES: usize = global_params::KYBER1024.ciphertext_size;
    const LEVEL: SecurityLevel = SecurityLevel::Level1024;
}

/// Tag naming one of the three fixed parameter sets.
///
/// Engines are selected by this tag (or by the matching type alias), never
/// by runtime-negotiated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityLevel {
    /// k = 2
    Level512,
    /// k = 3
    Level768,
    /// k = 4
    Level1024,
}

impl SecurityLevel {
    /// Module rank k for this level.
    pub const fn rank(self) -> usize {
        match self {
            SecurityLevel::Level512 => 2,
            SecurityLevel::Level768 => 3,
            SecurityLevel::Level1024 => 4,
        }
    }

    /// Resolve a raw private-key buffer length to its level.
    ///
    /// Unknown lengths are not coerced; the caller reports them as format
    /// errors.
    pub fn from_secret_key_len(len: usize) -> Option<Self> {
        match len {
            l if l == global_params::KYBER512.secret_key_size => Some(SecurityLevel::Level512),
            l if l == global_params::KYBER768.secret_key_size => Some(SecurityLevel::Level768),
            l if l == global_params::KYBER1024.secret_key_size => Some(SecurityLevel::Level1024),
            _ => None,
        }
    }

    /// Resolve a raw public-key buffer length to its level.
    pub fn from_public_key_len(len: usize) -> Option<Self> {
        match len {
            l if l == global_params::KYBER512.public_key_size => Some(SecurityLevel::Level512),
            l if l == global_params::KYBER768.public_key_size => Some(SecurityLevel::Level768),
            l if l == global_params::KYBER1024.public_key_size => Some(SecurityLevel::Level1024),
            _ => None,
        }
    }

    /// Resolve a raw ciphertext buffer length to its level.
    pub fn from_ciphertext_len(len: usize) -> Option<Self> {
        match len {
            l if l == global_params::KYBER512.ciphertext_size => Some(SecurityLevel::Level512),
            l if l == global_params::KYBER768.ciphertext_size => Some(SecurityLevel::Level768),
            l if l == global_params::KYBER1024.ciphertext_size => Some(SecurityLevel::Level1024),
            _ => None,
        }
    }
}
