//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the codec needs from its host.

use shared_crypto::CryptoError;
use thiserror::Error;

/// Error from a signer.
#[derive(Debug, Error)]
pub enum SignerError {
    /// The key material rejected the operation
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The signing backend could not be reached
    #[error("Signer unavailable: {0}")]
    Unavailable(String),
}

/// Produces seal signatures.
///
/// The key may live in memory, an HSM or a remote service. The codec only
/// needs the key's field size, which selects the digest, and raw `r || s`
/// output of exactly twice the field size in bytes.
pub trait SealSigner: Send + Sync {
    /// Field size of the signing key in bits.
    fn field_size_bits(&self) -> usize;

    /// Sign `data`.
    ///
    /// # Errors
    /// * `SignerError::Crypto` - key invalid or curve unsupported
    /// * `SignerError::Unavailable` - backend failure
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SignerError>;
}
