//! Constants for the Kyber key encapsulation mechanism

/// Kyber polynomial degree
pub const KYBER_N: usize = 256;

/// Kyber coefficient modulus
pub const KYBER_Q: u16 = 3329;

/// q^-1 mod 2^16, used by Montgomery reduction
pub const KYBER_QINV: u16 = 62209;

/// Size of seeds, messages and shared secrets in bytes
pub const KYBER_SYM_BYTES: usize = 32;

/// Size of a serialized polynomial (256 coefficients at 12 bits)
pub const KYBER_POLY_BYTES: usize = 384;

/// Size of the shared secret in bytes
pub const KYBER_SS_BYTES: usize = 32;

/// Structure containing the parameters of one Kyber security level
pub struct KyberParameters {
    /// Polynomial degree
    pub n: usize,

    /// Modulus
    pub q: u16,

    /// Number of polynomials per vector (module rank)
    pub k: usize,

    /// Noise parameter for the secret and error vectors
    pub eta1: u8,

    /// Noise parameter for the encryption noise
    pub eta2: u8,

    /// Compression bits for the ciphertext vector u
    pub du: usize,

    /// Compression bits for the ciphertext polynomial v
    pub dv: usize,

    /// Size of the public key in bytes
    pub public_key_size: usize,

    /// Size of the (CCA) secret key in bytes
    pub secret_key_size: usize,

    /// Size of the ciphertext in bytes
    pub ciphertext_size: usize,

    /// Size of the shared secret in bytes
    pub shared_secret_size: usize,
}

impl KyberParameters {
    /// Size of the packed secret polynomial vector in bytes
    pub const fn polyvec_size(&self) -> usize {
        self.k * KYBER_POLY_BYTES
    }

    /// Size of the packed IND-CPA public key in bytes (t || rho)
    pub const fn indcpa_public_key_size(&self) -> usize {
        self.polyvec_size() + KYBER_SYM_BYTES
    }

    /// Size of the compressed ciphertext vector u in bytes
    pub const fn polyvec_compressed_size(&self) -> usize {
        self.k * KYBER_N * self.du / 8
    }

    /// Size of the compressed ciphertext polynomial v in bytes
    pub const fn poly_compressed_size(&self) -> usize {
        KYBER_N * self.dv / 8
    }
}

/// Kyber-512 parameters (k = 2)
pub const KYBER512: KyberParameters = KyberParameters {
    n: KYBER_N,
    q: KYBER_Q,
    k: 2,
    eta1: 3,
    eta2: 2,
    du: 10,
    dv: 4,
    public_key_size: 800,
    secret_key_size: 1632,
    ciphertext_size: 768,
    shared_secret_size: 32,
};

/// Kyber-768 parameters (k = 3)
pub const KYBER768: KyberParameters = KyberParameters {
    n: KYBER_N,
    q: KYBER_Q,
    k: 3,
    eta1: 2,
    eta2: 2,
    du: 10,
    dv: 4,
    public_key_size: 1184,
    secret_key_size: 2400,
    ciphertext_size: 1088,
    shared_secret_size: 32,
};

/// Kyber-1024 parameters (k = 4)
pub const KYBER1024: KyberParameters = KyberParameters {
    n: KYBER_N,
    q: KYBER_Q,
    k: 4,
    eta1: 2,
    eta2: 2,
    du: 11,
    dv: 5,
    public_key_size: 1568,
    secret_key_size: 3168,
    ciphertext_size: 1568,
    shared_secret_size: 32,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_sizes_are_consistent() {
        for p in [&KYBER512, &KYBER768, &KYBER1024] {
            assert_eq!(p.indcpa_public_key_size(), p.public_key_size);
            assert_eq!(
                p.polyvec_compressed_size() + p.poly_compressed_size(),
                p.ciphertext_size
            );
            // sk_cpa || pk || H(pk) || z
            assert_eq!(
                p.polyvec_size() + p.public_key_size + 2 * KYBER_SYM_BYTES,
                p.secret_key_size
            );
        }
    }
}
