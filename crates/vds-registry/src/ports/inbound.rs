//! # Inbound Ports (Driving Ports / API)
//!
//! The registry as seen by the seal codec and by configuration loaders.

use crate::domain::definition::{DocumentTypeRecord, ExtendedDefinitionRecord};
use crate::domain::errors::RegistryResult;
use crate::domain::scope::{Message, RegistryTables};
use crate::domain::value::MessageValue;
use shared_codec::DerTlv;
use std::sync::Arc;
use uuid::Uuid;

/// Type registry API.
///
/// Implementations must be thread-safe (`Send + Sync`). Readers work on a
/// snapshot; replacing tables never affects a snapshot already handed out.
pub trait MessageRegistryApi: Send + Sync {
    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Current tables.
    fn snapshot(&self) -> Arc<RegistryTables>;

    // =========================================================================
    // Messages
    // =========================================================================

    /// Encode `value` as the message `name` of `document_type`.
    ///
    /// # Errors
    /// * `UnknownType` / `UnknownMessage` - name not registered
    /// * `ConstraintViolation` / `ValueCodingMismatch` - value rejected
    fn encode_message(
        &self,
        document_type: &str,
        name: &str,
        value: &MessageValue,
    ) -> RegistryResult<DerTlv>;

    /// Decode one TLV of `document_type`, optionally through an overlay.
    ///
    /// Returns `Ok(None)` for tags without a usable definition.
    fn decode_message(
        &self,
        document_type: &str,
        overlay: Option<&Uuid>,
        tlv: &DerTlv,
    ) -> RegistryResult<Option<Message>>;

    // =========================================================================
    // Table Management
    // =========================================================================

    /// Replace the base type table.
    fn load_document_types(&self, records: Vec<DocumentTypeRecord>) -> RegistryResult<()>;

    /// Replace the overlay table.
    fn load_extended_definitions(&self, records: Vec<ExtendedDefinitionRecord>)
        -> RegistryResult<()>;

    /// Restore the built-in tables.
    fn reset_to_defaults(&self) -> RegistryResult<()>;
}
