//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Field size has no digest assigned (above 512 bits)
    #[error("Unsupported curve field size: {bits} bits")]
    UnsupportedCurveFieldSize {
        /// Field size derived from the key, in bits
        bits: usize,
    },

    /// Invalid private key for the declared curve
    #[error("Invalid private key for {curve}")]
    InvalidPrivateKey {
        /// Curve name
        curve: &'static str,
    },

    /// Invalid public key for the declared curve
    #[error("Invalid public key for {curve}")]
    InvalidPublicKey {
        /// Curve name
        curve: &'static str,
    },

    /// Signature bytes are not a valid (r, s) pair
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// DER SEQUENCE { INTEGER r, INTEGER s } could not be parsed or built
    #[error("Malformed DER signature: {0}")]
    MalformedDerSignature(String),

    /// Signing backend failure
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
