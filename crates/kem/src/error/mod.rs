//! Error handling for KEM operations

use core::fmt;
use qcrypt_algorithms::error::Error as PrimitiveError;
use qcrypt_api::error::Error as CoreError;

#[cfg(feature = "std")]
use std::string::ToString;

/// Error type for KEM operations
#[derive(Debug, Clone)]
pub enum Error {
    /// Primitive error
    Primitive(PrimitiveError),

    /// KEM-specific errors
    KeyGeneration {
        algorithm: &'static str,
        details: &'static str,
    },

    Encapsulation {
        algorithm: &'static str,
        details: &'static str,
    },

    Decapsulation {
        algorithm: &'static str,
        details: &'static str,
    },

    /// Invalid key format
    InvalidKey {
        key_type: &'static str,
        reason: &'static str,
    },

    /// Invalid ciphertext format
    InvalidCiphertext {
        algorithm: &'static str,
        reason: &'static str,
    },

    /// Serialization/deserialization errors
    Serialization {
        context: &'static str,
        details: &'static str,
    },
}

/// Result type for KEM operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Primitive(e) => write!(f, "Primitive error: {}", e),
            Error::KeyGeneration { algorithm, details } => {
                write!(f, "Key generation error for {}: {}", algorithm, details)
            }
            Error::Encapsulation { algorithm, details } => {
                write!(f, "Encapsulation error for {}: {}", algorithm, details)
            }
            Error::Decapsulation { algorithm, details } => {
                write!(f, "Decapsulation error for {}: {}", algorithm, details)
            }
            Error::InvalidKey { key_type, reason } => {
                write!(f, "Invalid {} key: {}", key_type, reason)
            }
            Error::InvalidCiphertext { algorithm, reason } => {
                write!(f, "Invalid {} ciphertext: {}", algorithm, reason)
            }
            Error::Serialization { context, details } => {
                write!(f, "Serialization error in {}: {}", context, details)
            }
        }
    }
}

// Standard error trait
#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Primitive(e) => Some(e),
            _ => None,
        }
    }
}

// From PrimitiveError to Error
impl From<PrimitiveError> for Error {
    fn from(err: PrimitiveError) -> Self {
        Error::Primitive(err)
    }
}

// From Error to CoreError
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Primitive(e) => e.into(),
            Error::KeyGeneration { algorithm, details } => CoreError::Other {
                context: algorithm,
                #[cfg(feature = "std")]
                message: {
                    let mut m = "key generation failed: ".to_string();
                    m.push_str(details);
                    m
                },
            },
            Error::Encapsulation { algorithm, details } => CoreError::Other {
                context: algorithm,
                #[cfg(feature = "std")]
                message: {
                    let mut m = "encapsulation failed: ".to_string();
                    m.push_str(details);
                    m
                },
            },
            Error::Decapsulation { algorithm, details } => CoreError::DecryptionFailed {
                context: algorithm,
                #[cfg(feature = "std")]
                message: {
                    let mut m = "decapsulation failed: ".to_string();
                    m.push_str(details);
                    m
                },
            },
            Error::InvalidKey { key_type, reason } => CoreError::InvalidKey {
                context: key_type,
                #[cfg(feature = "std")]
                message: reason.to_string(),
            },
            Error::InvalidCiphertext { algorithm, reason } => CoreError::InvalidCiphertext {
                context: algorithm,
                #[cfg(feature = "std")]
                message: reason.to_string(),
            },
            Error::Serialization { context, details } => CoreError::SerializationError {
                context,
                #[cfg(feature = "std")]
                message: details.to_string(),
            },
        }
    }
}

// Include validation submodule
pub mod validate;
