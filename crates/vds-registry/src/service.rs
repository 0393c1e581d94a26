//! # Seal Registry Service
//!
//! Holds the current [`RegistryTables`] behind a lock that is only taken to
//! clone or replace an `Arc`. Readers keep their snapshot for as long as they
//! need it; a replacement never mutates a table in place.

use crate::domain::defaults::{default_extended_table, default_type_table};
use crate::domain::definition::{DocumentTypeRecord, ExtendedDefinitionRecord};
use crate::domain::errors::RegistryResult;
use crate::domain::scope::{Message, RegistryTables};
use crate::domain::tables::{ExtendedDefinitionTable, TypeTable};
use crate::domain::value::MessageValue;
use crate::ports::inbound::MessageRegistryApi;
use parking_lot::RwLock;
use shared_codec::DerTlv;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Process registry with atomically swapped tables.
pub struct SealRegistry {
    tables: RwLock<Arc<RegistryTables>>,
}

impl SealRegistry {
    /// Registry over the given tables.
    pub fn new(tables: RegistryTables) -> Self {
        Self {
            tables: RwLock::new(Arc::new(tables)),
        }
    }

    /// Registry over the built-in tables.
    pub fn with_defaults() -> RegistryResult<Self> {
        Ok(Self::new(default_tables()?))
    }

    /// Swap in complete tables.
    pub fn replace(&self, tables: RegistryTables) {
        info!(
            document_types = tables.types.len(),
            extended_definitions = tables.extended.len(),
            "Registry tables replaced"
        );
        *self.tables.write() = Arc::new(tables);
    }

    /// Swap in a new type table, keeping the current overlays.
    pub fn replace_types(&self, types: TypeTable) {
        let mut guard = self.tables.write();
        info!(document_types = types.len(), "Document type table replaced");
        *guard = Arc::new(RegistryTables {
            types: Arc::new(types),
            extended: Arc::clone(&guard.extended),
        });
    }

    /// Swap in a new overlay table, keeping the current types.
    pub fn replace_extended(&self, extended: ExtendedDefinitionTable) {
        let mut guard = self.tables.write();
        info!(
            extended_definitions = extended.len(),
            "Extended definition table replaced"
        );
        *guard = Arc::new(RegistryTables {
            types: Arc::clone(&guard.types),
            extended: Arc::new(extended),
        });
    }
}

fn default_tables() -> RegistryResult<RegistryTables> {
    Ok(RegistryTables::new(
        default_type_table()?,
        default_extended_table(),
    ))
}

impl MessageRegistryApi for SealRegistry {
    fn snapshot(&self) -> Arc<RegistryTables> {
        Arc::clone(&self.tables.read())
    }

    fn encode_message(
        &self,
        document_type: &str,
        name: &str,
        value: &MessageValue,
    ) -> RegistryResult<DerTlv> {
        let tables = self.snapshot();
        let scope = tables.scope(document_type, None)?;
        scope.encode(name, value)
    }

    fn decode_message(
        &self,
        document_type: &str,
        overlay: Option<&Uuid>,
        tlv: &DerTlv,
    ) -> RegistryResult<Option<Message>> {
        let tables = self.snapshot();
        let scope = tables.scope(document_type, overlay)?;
        scope.decode(tlv)
    }

    fn load_document_types(&self, records: Vec<DocumentTypeRecord>) -> RegistryResult<()> {
        let types = TypeTable::from_records(records)?;
        self.replace_types(types);
        Ok(())
    }

    fn load_extended_definitions(
        &self,
        records: Vec<ExtendedDefinitionRecord>,
    ) -> RegistryResult<()> {
        let extended = ExtendedDefinitionTable::from_records(records)?;
        self.replace_extended(extended);
        Ok(())
    }

    fn reset_to_defaults(&self) -> RegistryResult<()> {
        self.replace(default_tables()?);
        Ok(())
    }
}
