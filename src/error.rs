//! Error types for the zpz library

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid key size: {bits} bits (must be at least {min})")]
    InvalidKeySize { bits: u64, min: u64 },

    #[error("Message too large for modulus")]
    MessageTooLarge,

    #[error("Failed to compute modular inverse")]
    ModularInverseError,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to generate {what} after {attempts} attempts")]
    GenerationExhausted { what: String, attempts: u64 },
}
