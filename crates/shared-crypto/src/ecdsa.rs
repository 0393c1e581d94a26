//! # ECDSA Signature Engine
//!
//! Curve-agnostic ECDSA over raw `r || s` signatures.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Digest selected from the key's field size (see [`DigestAlgorithm`])
//! - Private scalars zeroized on drop
//!
//! ## Result Model
//!
//! Signing returns `Result`; verification returns a [`VerificationOutcome`]
//! so batch callers can tell a rejected signature from one that could not
//! be evaluated.

use crate::curve::{Curve, DigestAlgorithm};
use crate::CryptoError;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

// =============================================================================
// KEYS
// =============================================================================

/// ECDSA private key as a raw big-endian scalar.
///
/// The field size used for digest selection is `scalar.len() * 8`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EcPrivateKey {
    #[zeroize(skip)]
    curve: Curve,
    scalar: Vec<u8>,
}

impl EcPrivateKey {
    /// Wrap a raw scalar. Validity is checked when the key is used.
    pub fn from_bytes(curve: Curve, scalar: impl Into<Vec<u8>>) -> Self {
        Self {
            curve,
            scalar: scalar.into(),
        }
    }

    /// Generate a random key.
    pub fn generate(curve: Curve) -> Self {
        let mut rng = rand::thread_rng();
        let scalar = match curve {
            Curve::P256 => p256::ecdsa::SigningKey::random(&mut rng).to_bytes().to_vec(),
            Curve::P384 => p384::ecdsa::SigningKey::random(&mut rng).to_bytes().to_vec(),
            Curve::Secp256k1 => k256::ecdsa::SigningKey::random(&mut rng).to_bytes().to_vec(),
        };
        Self { curve, scalar }
    }

    /// Curve the scalar belongs to.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Raw scalar bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.scalar
    }

    /// Field size in bits, derived from the raw key length.
    pub fn field_size_bits(&self) -> usize {
        self.scalar.len() * 8
    }

    /// Derive the uncompressed SEC1 public key.
    pub fn public_key(&self) -> Result<EcPublicKey, CryptoError> {
        let invalid = || CryptoError::InvalidPrivateKey {
            curve: self.curve.name(),
        };
        let sec1 = match self.curve {
            Curve::P256 => p256::ecdsa::SigningKey::from_slice(&self.scalar)
                .map_err(|_| invalid())?
                .verifying_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            Curve::P384 => p384::ecdsa::SigningKey::from_slice(&self.scalar)
                .map_err(|_| invalid())?
                .verifying_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            Curve::Secp256k1 => k256::ecdsa::SigningKey::from_slice(&self.scalar)
                .map_err(|_| invalid())?
                .verifying_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
        };
        Ok(EcPublicKey {
            curve: self.curve,
            sec1,
        })
    }
}

impl std::fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EcPrivateKey({}, <private>)", self.curve)
    }
}

/// ECDSA public key in SEC1 encoding (compressed or uncompressed).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EcPublicKey {
    curve: Curve,
    sec1: Vec<u8>,
}

impl EcPublicKey {
    /// Wrap SEC1 bytes. Validity is checked when the key is used.
    pub fn from_sec1_bytes(curve: Curve, sec1: impl Into<Vec<u8>>) -> Self {
        Self {
            curve,
            sec1: sec1.into(),
        }
    }

    /// Curve the point lies on.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// SEC1-encoded point.
    pub fn as_bytes(&self) -> &[u8] {
        &self.sec1
    }

    /// Field size in bits, derived from the encoded point length.
    pub fn field_size_bits(&self) -> usize {
        match self.sec1.first() {
            Some(0x04) => (self.sec1.len() - 1) / 2 * 8,
            Some(_) => (self.sec1.len() - 1) * 8,
            None => 0,
        }
    }
}

// =============================================================================
// SIGNING
// =============================================================================

/// Sign `data`, returning a raw `r || s` signature of `2 * field_bytes` bytes.
pub fn sign(key: &EcPrivateKey, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let field_bits = key.field_size_bits();
    let digest = DigestAlgorithm::for_field_size(field_bits)?;
    let prehash = digest.digest(data);

    debug!(
        curve = %key.curve,
        field_bits,
        digest = digest.name(),
        data_len = data.len(),
        "Signing seal data"
    );

    let invalid = || CryptoError::InvalidPrivateKey {
        curve: key.curve.name(),
    };
    let failed = |e: k256::ecdsa::Error| CryptoError::SigningFailed(e.to_string());

    let raw = match key.curve {
        Curve::P256 => {
            let signing_key = p256::ecdsa::SigningKey::from_slice(&key.scalar).map_err(|_| invalid())?;
            let sig: p256::ecdsa::Signature =
                PrehashSigner::sign_prehash(&signing_key, &prehash).map_err(failed)?;
            sig.to_bytes().to_vec()
        }
        Curve::P384 => {
            let signing_key = p384::ecdsa::SigningKey::from_slice(&key.scalar).map_err(|_| invalid())?;
            let sig: p384::ecdsa::Signature =
                PrehashSigner::sign_prehash(&signing_key, &prehash).map_err(failed)?;
            sig.to_bytes().to_vec()
        }
        Curve::Secp256k1 => {
            let signing_key = k256::ecdsa::SigningKey::from_slice(&key.scalar).map_err(|_| invalid())?;
            let sig: k256::ecdsa::Signature =
                PrehashSigner::sign_prehash(&signing_key, &prehash).map_err(failed)?;
            sig.to_bytes().to_vec()
        }
    };

    Ok(raw)
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Tri-state verification result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Signature matches the message and key
    Valid,
    /// Signature was evaluated and rejected
    Invalid,
    /// Signature could not be evaluated (bad key, unsupported field size)
    Error(CryptoError),
}

impl VerificationOutcome {
    /// `true` only for [`VerificationOutcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationOutcome::Valid)
    }
}

/// Verify a raw `r || s` signature over `message`.
///
/// A signature of the wrong length or with out-of-range scalars is
/// `Invalid`; a key that cannot be used is `Error`.
pub fn verify(public_key: &EcPublicKey, message: &[u8], signature: &[u8]) -> VerificationOutcome {
    let field_bits = public_key.field_size_bits();
    let digest = match DigestAlgorithm::for_field_size(field_bits) {
        Ok(d) => d,
        Err(e) => return VerificationOutcome::Error(e),
    };

    let expected = 2 * public_key.curve.field_size_bytes();
    if signature.len() != expected {
        debug!(
            expected,
            actual = signature.len(),
            "Rejecting signature with wrong length"
        );
        return VerificationOutcome::Invalid;
    }

    let prehash = digest.digest(message);
    match verify_prehash(public_key, &prehash, signature) {
        Ok(true) => VerificationOutcome::Valid,
        Ok(false) => VerificationOutcome::Invalid,
        Err(e) => VerificationOutcome::Error(e),
    }
}

/// `Ok(false)` = rejected signature, `Err` = unusable key.
fn verify_prehash(
    public_key: &EcPublicKey,
    prehash: &[u8],
    signature: &[u8],
) -> Result<bool, CryptoError> {
    let invalid_key = || CryptoError::InvalidPublicKey {
        curve: public_key.curve.name(),
    };

    let accepted = match public_key.curve {
        Curve::P256 => {
            let vk = p256::ecdsa::VerifyingKey::from_sec1_bytes(&public_key.sec1)
                .map_err(|_| invalid_key())?;
            match p256::ecdsa::Signature::from_slice(signature) {
                Ok(sig) => PrehashVerifier::verify_prehash(&vk, prehash, &sig).is_ok(),
                Err(_) => false,
            }
        }
        Curve::P384 => {
            let vk = p384::ecdsa::VerifyingKey::from_sec1_bytes(&public_key.sec1)
                .map_err(|_| invalid_key())?;
            match p384::ecdsa::Signature::from_slice(signature) {
                Ok(sig) => PrehashVerifier::verify_prehash(&vk, prehash, &sig).is_ok(),
                Err(_) => false,
            }
        }
        Curve::Secp256k1 => {
            let vk = k256::ecdsa::VerifyingKey::from_sec1_bytes(&public_key.sec1)
                .map_err(|_| invalid_key())?;
            match k256::ecdsa::Signature::from_slice(signature) {
                Ok(sig) => PrehashVerifier::verify_prehash(&vk, prehash, &sig).is_ok(),
                Err(_) => false,
            }
        }
    };
    Ok(accepted)
}

// =============================================================================
// BATCH VERIFICATION
// =============================================================================

/// One signature to check in a batch.
#[derive(Clone, Debug)]
pub struct VerificationRequest {
    /// Key the signature is checked against
    pub public_key: EcPublicKey,
    /// Signed bytes, before hashing
    pub message: Vec<u8>,
    /// Raw `r‖s`
    pub signature: Vec<u8>,
}

/// Result of batch verification.
#[derive(Clone, Debug)]
pub struct BatchVerificationResult {
    /// Individual outcomes, in request order
    pub outcomes: Vec<VerificationOutcome>,
    /// Whether every outcome is `Valid`
    pub all_valid: bool,
    /// Number of `Valid` outcomes
    pub valid_count: usize,
    /// Number of `Invalid` outcomes
    pub invalid_count: usize,
    /// Number of `Error` outcomes
    pub error_count: usize,
}

impl BatchVerificationResult {
    /// Create a batch result from individual outcomes.
    pub fn from_outcomes(outcomes: Vec<VerificationOutcome>) -> Self {
        let valid_count = outcomes.iter().filter(|o| o.is_valid()).count();
        let error_count = outcomes
            .iter()
            .filter(|o| matches!(o, VerificationOutcome::Error(_)))
            .count();
        let invalid_count = outcomes.len() - valid_count - error_count;

        Self {
            all_valid: valid_count == outcomes.len(),
            outcomes,
            valid_count,
            invalid_count,
            error_count,
        }
    }
}

/// Verify many signatures in parallel.
pub fn batch_verify(requests: &[VerificationRequest]) -> BatchVerificationResult {
    use rayon::prelude::*;

    let outcomes: Vec<VerificationOutcome> = requests
        .par_iter()
        .map(|req| verify(&req.public_key, &req.message, &req.signature))
        .collect();

    BatchVerificationResult::from_outcomes(outcomes)
}
