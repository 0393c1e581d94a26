//! # Seal Errors
//!
//! Structural decode failures abort the seal. Best-effort tolerances
//! (unknown `documentRef`, unresolvable messages) never surface here.

use shared_codec::CodecError;
use shared_crypto::CryptoError;
use thiserror::Error;
use vds_registry::RegistryError;

/// Errors raised while building or parsing seals.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SealError {
    /// First byte is not the VDS magic constant
    #[error("Invalid magic byte: expected 0xdc, found 0x{found:02x}")]
    InvalidMagic {
        /// Byte found at offset 0
        found: u8,
    },

    /// Version byte is neither v3 nor v4
    #[error("Unsupported header version byte 0x{version:02x}")]
    UnsupportedHeaderVersion {
        /// Raw version byte
        version: u8,
    },

    /// A header field cannot be represented
    #[error("Invalid header field {field}: {reason}")]
    InvalidHeaderField {
        /// Field name
        field: &'static str,
        /// What was wrong
        reason: String,
    },

    /// Transport string does not start with the barcode identifier
    #[error("Not an ICAO barcode: expected prefix {expected}")]
    InvalidBarcodeIdentifier {
        /// Configured identifier
        expected: String,
    },

    /// Barcode flag is not one of the supported values
    #[error("Unsupported barcode flag {0:?}")]
    UnsupportedBarcodeFlag(char),

    /// IDB signature algorithm byte is not known
    #[error("Unsupported IDB signature algorithm 0x{0:02x}")]
    UnsupportedSignatureAlgorithm(u8),

    /// Message zone layout is broken
    #[error("Malformed seal: {0}")]
    MalformedSeal(String),

    /// Configuration rejected by `SealConfig::validate`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Signer port failure
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Byte-level codec failure
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Registry lookup or value failure
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Cryptographic failure
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Shorthand result type for seal operations.
pub type SealResult<T> = Result<T, SealError>;
