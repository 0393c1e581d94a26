//! # VDS Registry - Document Types and Extended Definitions
//!
//! Maps `documentRef` values to document types and message tags to names
//! and codings.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): codings, values, validated tables, resolution
//! - **Ports Layer** (`ports/`): the registry API
//! - **Service Layer** (`service.rs`): [`SealRegistry`], the swappable holder
//!
//! ## Resolution
//!
//! Types flagged `requires_uuid_lookup` carry a 16-byte UUID in a configured
//! message. That UUID selects an extended definition whose messages take
//! precedence over the base type's. Encoding misses are errors; decoding
//! misses drop the message.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::coding::{Coding, Constraints};
pub use domain::defaults::{
    default_extended_table, default_type_table, ADDRESS_STICKER_ID, ADDRESS_STICKER_PASSPORT,
    ADMINISTRATIVE_DOCUMENTS, ARRIVAL_ATTESTATION, ICAO_BARCODE, ICAO_BARCODE_REF,
    ICAO_EMERGENCY_TRAVEL_DOCUMENT, ICAO_VISA, RESIDENCE_PERMIT, SOCIAL_INSURANCE_CARD,
    SUPPLEMENTARY_SHEET,
};
pub use domain::definition::{
    DocumentTypeDefinition, DocumentTypeRecord, ExtendedDefinition, ExtendedDefinitionRecord,
    MessageDefinition, UNKNOWN_DOCUMENT_TYPE,
};
pub use domain::errors::{RegistryError, RegistryResult};
pub use domain::scope::{Message, MessageScope, RegistryTables};
pub use domain::tables::{ExtendedDefinitionTable, TypeTable};
pub use domain::value::MessageValue;
pub use ports::inbound::MessageRegistryApi;
pub use service::SealRegistry;
