//! # Shared Crypto - Seal Signature Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `curve` | P-256, P-384, secp256k1 / SHA-2 | Curve catalogue, digest selection |
//! | `ecdsa` | ECDSA (raw `r || s`) | Seal signing and verification |
//! | `der` | ASN.1 DER | Signature interchange with X.509 tooling |
//!
//! ## Security Properties
//!
//! - **ECDSA**: RFC 6979 deterministic nonces, no RNG dependency for signing
//! - **Digest**: chosen from the key's field size, never from caller input
//! - **Keys**: private scalars zeroized on drop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod curve;
pub mod der;
pub mod ecdsa;
pub mod errors;

// Re-exports
pub use curve::{Curve, DigestAlgorithm};
pub use ecdsa::{
    batch_verify, sign, verify, BatchVerificationResult, EcPrivateKey, EcPublicKey,
    VerificationOutcome, VerificationRequest,
};
pub use errors::CryptoError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
