//! # Type and Message Definitions
//!
//! Validated registry entries plus the serde records an external loader
//! hands over. Records are converted with `TryFrom`; conversion is where
//! hex refs, UUIDs and tag uniqueness are checked.

use crate::domain::coding::{Coding, Constraints};
use crate::domain::errors::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use shared_codec::SIGNATURE_TAG;
use std::collections::HashSet;
use uuid::Uuid;

/// Document type name used when a `documentRef` is not registered.
pub const UNKNOWN_DOCUMENT_TYPE: &str = "UNKNOWN";

// =============================================================================
// MESSAGE DEFINITIONS
// =============================================================================

/// One message slot of a document type: tag, name, coding, bounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDefinition {
    pub tag: u8,
    pub name: String,
    pub coding: Coding,
    #[serde(default)]
    pub constraints: Constraints,
}

impl MessageDefinition {
    pub fn new(tag: u8, name: impl Into<String>, coding: Coding, constraints: Constraints) -> Self {
        Self {
            tag,
            name: name.into(),
            coding,
            constraints,
        }
    }
}

/// Find a message by tag.
pub(crate) fn find_by_tag(messages: &[MessageDefinition], tag: u8) -> Option<&MessageDefinition> {
    messages.iter().find(|m| m.tag == tag)
}

/// Find a message by name, ignoring ASCII case.
pub(crate) fn find_by_name<'a>(
    messages: &'a [MessageDefinition],
    name: &str,
) -> Option<&'a MessageDefinition> {
    messages.iter().find(|m| m.name.eq_ignore_ascii_case(name))
}

fn validate_messages(owner: &str, messages: &[MessageDefinition]) -> RegistryResult<()> {
    let mut tags = HashSet::new();
    let mut names = HashSet::new();
    for message in messages {
        if message.tag == SIGNATURE_TAG {
            return Err(RegistryError::ReservedTag {
                document_type: owner.to_string(),
            });
        }
        if !tags.insert(message.tag) {
            return Err(RegistryError::InvalidRecord {
                record: owner.to_string(),
                reason: format!("duplicate tag 0x{:02x}", message.tag),
            });
        }
        if !names.insert(message.name.to_ascii_uppercase()) {
            return Err(RegistryError::InvalidRecord {
                record: owner.to_string(),
                reason: format!("duplicate message name {}", message.name),
            });
        }
    }
    Ok(())
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// Input record for a document type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypeRecord {
    pub document_type: String,
    /// Four hex digits, optionally `0x`-prefixed
    pub document_ref: String,
    #[serde(default)]
    pub version: u8,
    #[serde(default)]
    pub requires_uuid_lookup: bool,
    #[serde(default)]
    pub uuid_tag: u8,
    /// Tag of the single TLV that wraps all messages (legacy layout)
    #[serde(default)]
    pub wrapper_tag: Option<u8>,
    pub messages: Vec<MessageDefinition>,
}

/// A registered document type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentTypeDefinition {
    pub name: String,
    /// `(docFeatureRef << 8) | docTypeCat`
    pub document_ref: u16,
    pub version: u8,
    pub requires_uuid_lookup: bool,
    /// Tag holding the 16-byte overlay UUID when `requires_uuid_lookup`
    pub uuid_tag: u8,
    pub wrapper_tag: Option<u8>,
    pub messages: Vec<MessageDefinition>,
}

impl DocumentTypeDefinition {
    /// Validating constructor.
    pub fn new(
        name: impl Into<String>,
        document_ref: u16,
        messages: Vec<MessageDefinition>,
    ) -> RegistryResult<Self> {
        let name = name.into();
        validate_messages(&name, &messages)?;
        if name.eq_ignore_ascii_case(UNKNOWN_DOCUMENT_TYPE) {
            return Err(RegistryError::InvalidRecord {
                record: name,
                reason: "type name is reserved".to_string(),
            });
        }
        Ok(Self {
            name,
            document_ref,
            version: 1,
            requires_uuid_lookup: false,
            uuid_tag: 0,
            wrapper_tag: None,
            messages,
        })
    }

    /// Resolve messages through an extended definition found at `uuid_tag`.
    pub fn with_uuid_lookup(mut self, uuid_tag: u8) -> Self {
        self.requires_uuid_lookup = true;
        self.uuid_tag = uuid_tag;
        self
    }

    /// Wrap all messages in one TLV with `tag`.
    pub fn with_wrapper_tag(mut self, tag: u8) -> RegistryResult<Self> {
        if tag == SIGNATURE_TAG {
            return Err(RegistryError::ReservedTag {
                document_type: self.name,
            });
        }
        self.wrapper_tag = Some(tag);
        Ok(self)
    }

    pub fn message_by_tag(&self, tag: u8) -> Option<&MessageDefinition> {
        find_by_tag(&self.messages, tag)
    }

    pub fn message_by_name(&self, name: &str) -> Option<&MessageDefinition> {
        find_by_name(&self.messages, name)
    }

    /// `docFeatureRef` byte.
    pub fn doc_feature_ref(&self) -> u8 {
        (self.document_ref >> 8) as u8
    }

    /// `docTypeCat` byte.
    pub fn doc_type_cat(&self) -> u8 {
        (self.document_ref & 0xFF) as u8
    }
}

impl TryFrom<DocumentTypeRecord> for DocumentTypeDefinition {
    type Error = RegistryError;

    fn try_from(record: DocumentTypeRecord) -> RegistryResult<Self> {
        let document_ref = parse_document_ref(&record.document_type, &record.document_ref)?;
        let mut definition =
            DocumentTypeDefinition::new(record.document_type, document_ref, record.messages)?;
        definition.version = record.version;
        if record.requires_uuid_lookup {
            definition = definition.with_uuid_lookup(record.uuid_tag);
        }
        if let Some(tag) = record.wrapper_tag {
            definition = definition.with_wrapper_tag(tag)?;
        }
        Ok(definition)
    }
}

fn parse_document_ref(owner: &str, text: &str) -> RegistryResult<u16> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || digits.len() > 4 {
        return Err(RegistryError::InvalidRecord {
            record: owner.to_string(),
            reason: format!("documentRef {text:?} is not 1-4 hex digits"),
        });
    }
    u16::from_str_radix(digits, 16).map_err(|e| RegistryError::InvalidRecord {
        record: owner.to_string(),
        reason: format!("documentRef {text:?}: {e}"),
    })
}

// =============================================================================
// EXTENDED DEFINITIONS
// =============================================================================

/// Input record for a UUID-keyed overlay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedDefinitionRecord {
    pub definition_id: String,
    pub definition_name: String,
    pub base_document_type: String,
    #[serde(default)]
    pub version: u8,
    pub messages: Vec<MessageDefinition>,
}

/// Overlay message table selected by a UUID carried in the seal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedDefinition {
    pub definition_id: Uuid,
    pub definition_name: String,
    pub base_document_type: String,
    pub version: u8,
    pub messages: Vec<MessageDefinition>,
}

impl ExtendedDefinition {
    /// Validating constructor.
    pub fn new(
        definition_id: Uuid,
        definition_name: impl Into<String>,
        base_document_type: impl Into<String>,
        messages: Vec<MessageDefinition>,
    ) -> RegistryResult<Self> {
        let definition_name = definition_name.into();
        validate_messages(&definition_name, &messages)?;
        Ok(Self {
            definition_id,
            definition_name,
            base_document_type: base_document_type.into(),
            version: 1,
            messages,
        })
    }

    /// Registry key: lowercase hex without hyphens.
    pub fn key(&self) -> String {
        overlay_key(&self.definition_id)
    }

    /// Whether this overlay was registered for `base`.
    pub fn extends(&self, base: &DocumentTypeDefinition) -> bool {
        self.base_document_type.eq_ignore_ascii_case(&base.name)
    }

    pub fn message_by_tag(&self, tag: u8) -> Option<&MessageDefinition> {
        find_by_tag(&self.messages, tag)
    }

    pub fn message_by_name(&self, name: &str) -> Option<&MessageDefinition> {
        find_by_name(&self.messages, name)
    }
}

impl TryFrom<ExtendedDefinitionRecord> for ExtendedDefinition {
    type Error = RegistryError;

    fn try_from(record: ExtendedDefinitionRecord) -> RegistryResult<Self> {
        let definition_id =
            Uuid::parse_str(&record.definition_id).map_err(|e| RegistryError::InvalidRecord {
                record: record.definition_name.clone(),
                reason: format!("definitionId {:?}: {e}", record.definition_id),
            })?;
        let mut definition = ExtendedDefinition::new(
            definition_id,
            record.definition_name,
            record.base_document_type,
            record.messages,
        )?;
        definition.version = record.version;
        Ok(definition)
    }
}

/// Lookup key for an overlay UUID.
pub fn overlay_key(id: &Uuid) -> String {
    id.simple().to_string()
}
