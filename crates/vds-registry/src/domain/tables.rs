//! # Registry Tables
//!
//! Immutable, validated lookup tables. A table is built once and replaced
//! wholesale; nothing mutates it after construction.

use crate::domain::defaults::ICAO_BARCODE;
use crate::domain::definition::{
    overlay_key, DocumentTypeDefinition, DocumentTypeRecord, ExtendedDefinition,
    ExtendedDefinitionRecord,
};
use crate::domain::errors::{RegistryError, RegistryResult};
use std::collections::HashMap;
use uuid::Uuid;

/// Base document types, indexed by name and by `documentRef`.
///
/// The IDB message set is reachable by name only; VDS headers never
/// resolve to it.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    types: Vec<DocumentTypeDefinition>,
    by_name: HashMap<String, usize>,
    by_ref: HashMap<u16, usize>,
}

impl TypeTable {
    /// Build from validated definitions. Names and refs must be unique.
    pub fn new(types: Vec<DocumentTypeDefinition>) -> RegistryResult<Self> {
        let mut by_name = HashMap::with_capacity(types.len());
        let mut by_ref = HashMap::with_capacity(types.len());

        for (index, definition) in types.iter().enumerate() {
            if by_name
                .insert(definition.name.to_ascii_uppercase(), index)
                .is_some()
            {
                return Err(RegistryError::InvalidRecord {
                    record: definition.name.clone(),
                    reason: "duplicate document type name".to_string(),
                });
            }
            if definition.name.eq_ignore_ascii_case(ICAO_BARCODE) {
                continue;
            }
            if by_ref.insert(definition.document_ref, index).is_some() {
                return Err(RegistryError::InvalidRecord {
                    record: definition.name.clone(),
                    reason: format!("duplicate documentRef 0x{:04x}", definition.document_ref),
                });
            }
        }

        Ok(Self {
            types,
            by_name,
            by_ref,
        })
    }

    /// Build from loader records.
    pub fn from_records(records: Vec<DocumentTypeRecord>) -> RegistryResult<Self> {
        let types = records
            .into_iter()
            .map(DocumentTypeDefinition::try_from)
            .collect::<RegistryResult<Vec<_>>>()?;
        Self::new(types)
    }

    /// Case-insensitive lookup by type name.
    pub fn get(&self, name: &str) -> Option<&DocumentTypeDefinition> {
        self.by_name
            .get(&name.to_ascii_uppercase())
            .map(|&i| &self.types[i])
    }

    pub fn by_ref(&self, document_ref: u16) -> Option<&DocumentTypeDefinition> {
        self.by_ref.get(&document_ref).map(|&i| &self.types[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentTypeDefinition> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// UUID-keyed overlays.
#[derive(Clone, Debug, Default)]
pub struct ExtendedDefinitionTable {
    definitions: HashMap<String, ExtendedDefinition>,
}

impl ExtendedDefinitionTable {
    pub fn new(definitions: Vec<ExtendedDefinition>) -> RegistryResult<Self> {
        let mut map = HashMap::with_capacity(definitions.len());
        for definition in definitions {
            let key = definition.key();
            if map.contains_key(&key) {
                return Err(RegistryError::InvalidRecord {
                    record: definition.definition_name,
                    reason: format!("duplicate definitionId {}", definition.definition_id),
                });
            }
            map.insert(key, definition);
        }
        Ok(Self { definitions: map })
    }

    pub fn from_records(records: Vec<ExtendedDefinitionRecord>) -> RegistryResult<Self> {
        let definitions = records
            .into_iter()
            .map(ExtendedDefinition::try_from)
            .collect::<RegistryResult<Vec<_>>>()?;
        Self::new(definitions)
    }

    pub fn get(&self, id: &Uuid) -> Option<&ExtendedDefinition> {
        self.definitions.get(&overlay_key(id))
    }

    /// Look up by the raw 16 bytes found in a seal. Other lengths never match.
    pub fn get_by_bytes(&self, bytes: &[u8]) -> Option<&ExtendedDefinition> {
        Uuid::from_slice(bytes).ok().and_then(|id| self.get(&id))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
