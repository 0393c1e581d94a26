//! # Message Resolution
//!
//! [`RegistryTables`] is one consistent snapshot of both tables.
//! [`MessageScope`] binds a document type and, optionally, the overlay
//! selected by the seal's UUID. Overlay entries win; tags the overlay does
//! not define fall back to the base type.

use crate::domain::coding::Coding;
use crate::domain::definition::{DocumentTypeDefinition, ExtendedDefinition, MessageDefinition};
use crate::domain::errors::{RegistryError, RegistryResult};
use crate::domain::tables::{ExtendedDefinitionTable, TypeTable};
use crate::domain::value::MessageValue;
use serde::Serialize;
use shared_codec::DerTlv;
use std::sync::Arc;
use tracing::{debug, warn};

/// A decoded message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Message {
    pub tag: u8,
    pub name: String,
    pub coding: Coding,
    pub value: MessageValue,
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Base type table plus overlay table, swapped together.
#[derive(Clone, Debug, Default)]
pub struct RegistryTables {
    pub types: Arc<TypeTable>,
    pub extended: Arc<ExtendedDefinitionTable>,
}

impl RegistryTables {
    pub fn new(types: TypeTable, extended: ExtendedDefinitionTable) -> Self {
        Self {
            types: Arc::new(types),
            extended: Arc::new(extended),
        }
    }

    /// Scope for encoding or decoding messages of `document_type`.
    pub fn scope(
        &self,
        document_type: &str,
        overlay: Option<&uuid::Uuid>,
    ) -> RegistryResult<MessageScope<'_>> {
        let base = self
            .types
            .get(document_type)
            .ok_or_else(|| RegistryError::UnknownType {
                document_type: document_type.to_string(),
            })?;
        let overlay = match overlay {
            Some(id) => Some(
                self.extended
                    .get(id)
                    .filter(|o| o.extends(base))
                    .ok_or_else(|| RegistryError::UnknownType {
                        document_type: format!("{}/{id}", base.name),
                    })?,
            ),
            None => None,
        };
        Ok(MessageScope { base, overlay })
    }

    /// Scope for decoding a parsed message list.
    ///
    /// When the type requires a UUID lookup, the overlay is taken from the
    /// TLV at the type's `uuid_tag`. A missing or unregistered UUID, or one
    /// registered for a different base type, leaves the base type in effect.
    pub fn scope_for_messages(
        &self,
        document_type: &str,
        messages: &[DerTlv],
    ) -> RegistryResult<MessageScope<'_>> {
        let mut scope = self.scope(document_type, None)?;
        let base = scope.base;
        if !base.requires_uuid_lookup {
            return Ok(scope);
        }

        match messages.iter().find(|tlv| tlv.tag == base.uuid_tag) {
            Some(tlv) => match self.extended.get_by_bytes(&tlv.value) {
                Some(overlay) if !overlay.extends(base) => warn!(
                    document_type = %base.name,
                    definition = %overlay.definition_name,
                    extends = %overlay.base_document_type,
                    "Extended definition belongs to another type, using base type"
                ),
                Some(overlay) => {
                    debug!(
                        document_type = %base.name,
                        definition = %overlay.definition_name,
                        "Resolved extended definition"
                    );
                    scope.overlay = Some(overlay);
                }
                None => warn!(
                    document_type = %base.name,
                    uuid = %hex_string(&tlv.value),
                    "Extended definition not registered, using base type"
                ),
            },
            None => warn!(
                document_type = %base.name,
                uuid_tag = base.uuid_tag,
                "Seal carries no definition UUID, using base type"
            ),
        }
        Ok(scope)
    }
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =============================================================================
// SCOPE
// =============================================================================

/// Resolution context for one document type.
#[derive(Clone, Copy, Debug)]
pub struct MessageScope<'a> {
    base: &'a DocumentTypeDefinition,
    overlay: Option<&'a ExtendedDefinition>,
}

impl<'a> MessageScope<'a> {
    pub fn document_type(&self) -> &'a DocumentTypeDefinition {
        self.base
    }

    pub fn overlay(&self) -> Option<&'a ExtendedDefinition> {
        self.overlay
    }

    /// Definition for `tag`, overlay first.
    pub fn definition_by_tag(&self, tag: u8) -> Option<&'a MessageDefinition> {
        self.overlay
            .and_then(|o| o.message_by_tag(tag))
            .or_else(|| self.base.message_by_tag(tag))
    }

    /// Definition for `name` (case-insensitive), overlay first.
    pub fn definition_by_name(&self, name: &str) -> Option<&'a MessageDefinition> {
        self.overlay
            .and_then(|o| o.message_by_name(name))
            .or_else(|| self.base.message_by_name(name))
    }

    /// Encode a named value as a TLV.
    pub fn encode(&self, name: &str, value: &MessageValue) -> RegistryResult<DerTlv> {
        let definition =
            self.definition_by_name(name)
                .ok_or_else(|| RegistryError::UnknownMessage {
                    document_type: self.base.name.clone(),
                    name: name.to_string(),
                })?;

        if let Some(length) = value.constraint_length() {
            definition
                .constraints
                .check(length)
                .map_err(|detail| RegistryError::ConstraintViolation {
                    name: definition.name.clone(),
                    length,
                    detail,
                })?;
        }

        let bytes = value.to_bytes(&definition.name, definition.coding)?;
        Ok(DerTlv::new(definition.tag, bytes))
    }

    /// Decode one TLV.
    ///
    /// `Ok(None)` when the tag is not defined or its coding is `UNKNOWN`;
    /// such messages are dropped so seals with newer tags stay readable.
    pub fn decode(&self, tlv: &DerTlv) -> RegistryResult<Option<Message>> {
        let definition = match self.definition_by_tag(tlv.tag) {
            Some(d) if d.coding != Coding::Unknown => d,
            Some(d) => {
                warn!(
                    document_type = %self.base.name,
                    tag = tlv.tag,
                    name = %d.name,
                    "Dropping message with UNKNOWN coding"
                );
                return Ok(None);
            }
            None => {
                warn!(
                    document_type = %self.base.name,
                    tag = tlv.tag,
                    "Dropping unregistered message"
                );
                return Ok(None);
            }
        };

        let mut value = MessageValue::from_bytes(definition.coding, &tlv.value)?;
        if let (Coding::Mrz, Some(total_length)) =
            (definition.coding, definition.constraints.max_length)
        {
            value = value.into_mrz_layout(total_length);
        }

        Ok(Some(Message {
            tag: tlv.tag,
            name: definition.name.clone(),
            coding: definition.coding,
            value,
        }))
    }

    /// Decode a message list, dropping unresolvable entries.
    pub fn decode_all(&self, tlvs: &[DerTlv]) -> RegistryResult<Vec<Message>> {
        let mut messages = Vec::with_capacity(tlvs.len());
        for tlv in tlvs {
            if let Some(message) = self.decode(tlv)? {
                messages.push(message);
            }
        }
        Ok(messages)
    }
}
