//! # Curves and Digest Selection
//!
//! The digest is picked from the curve field size, never from the curve name:
//!
//! | Field size (bits) | Digest  |
//! |-------------------|---------|
//! | `<= 224`          | SHA-224 |
//! | `<= 256`          | SHA-256 |
//! | `<= 384`          | SHA-384 |
//! | `<= 512`          | SHA-512 |
//! | larger            | rejected |

use crate::CryptoError;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::fmt;

/// Elliptic curves with a signing backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-256 (secp256r1)
    P256,
    /// NIST P-384 (secp384r1)
    P384,
    /// secp256k1
    Secp256k1,
}

impl Curve {
    /// Canonical curve name.
    pub fn name(&self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::Secp256k1 => "secp256k1",
        }
    }

    /// Size of a field element (and of a raw private key) in bytes.
    pub fn field_size_bytes(&self) -> usize {
        match self {
            Curve::P256 | Curve::Secp256k1 => 32,
            Curve::P384 => 48,
        }
    }

    /// Look up a curve by its common names (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "p-256" | "p256" | "secp256r1" | "prime256v1" => Some(Curve::P256),
            "p-384" | "p384" | "secp384r1" => Some(Curve::P384),
            "secp256k1" => Some(Curve::Secp256k1),
            _ => None,
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Digest applied to the signed data before ECDSA.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// Field sizes up to 224 bits
    Sha224,
    /// Field sizes up to 256 bits
    Sha256,
    /// Field sizes up to 384 bits
    Sha384,
    /// Field sizes up to 512 bits
    Sha512,
}

impl DigestAlgorithm {
    /// Select the digest for a curve field size in bits.
    pub fn for_field_size(bits: usize) -> Result<Self, CryptoError> {
        match bits {
            0..=224 => Ok(DigestAlgorithm::Sha224),
            225..=256 => Ok(DigestAlgorithm::Sha256),
            257..=384 => Ok(DigestAlgorithm::Sha384),
            385..=512 => Ok(DigestAlgorithm::Sha512),
            _ => Err(CryptoError::UnsupportedCurveFieldSize { bits }),
        }
    }

    /// Display name, e.g. `"SHA-256"`.
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha224 => "SHA-224",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Hash `data`.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}
