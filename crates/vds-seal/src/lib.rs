//! # VDS Seal - Visible Digital Seals and ICAO Barcodes
//!
//! Builds, parses and verifies signed barcode content.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): headers, seal variants, assembly and parsing
//! - **Ports Layer** (`ports/`): the codec API and the signer it drives
//! - **Adapters Layer** (`adapters/`): in-memory key signer
//! - **Service Layer** (`service.rs`): [`SealService`], wires registry, config and signer
//!
//! ## Formats
//!
//! | Variant | Message zone | Transport |
//! |---------|--------------|-----------|
//! | `LegacySingleMessage` | one wrapper TLV | Base-256 |
//! | `MessageGroup` | top-level TLVs | Base-256 |
//! | `IdbBarcode` | `0x61` group | identifier + flag + Base32 |
//!
//! ## Tolerances
//!
//! Unregistered `documentRef` values parse as `"UNKNOWN"`; unresolvable
//! messages are dropped. Structural damage is always an error.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::key_signer::KeySigner;
pub use domain::config::SealConfig;
pub use domain::errors::{SealError, SealResult};
pub use domain::header::{CertRefLayout, HeaderVersion, VdsHeader, VdsHeaderParams, VDS_MAGIC};
pub use domain::idb_header::{
    IdbHeader, IdbSignatureAlgorithm, IdbSignatureInfo, IDB_CERT_REF_LEN,
};
pub use domain::seal::{
    IdbSeal, IdbSealParams, MessageInput, Seal, VdsSeal, IDB_FLAG_SIGNED, IDB_FLAG_UNSIGNED,
    IDB_MESSAGE_GROUP_TAG, IDB_SIGNATURE_TAG, IDB_SIGNER_CERTIFICATE_TAG,
};
pub use ports::inbound::SealCodecApi;
pub use ports::outbound::{SealSigner, SignerError};
pub use service::SealService;
