//! # Registry Errors
//!
//! Encode-time lookups fail hard; decode-time misses are tolerated by the
//! caller and never reach this type.

use crate::domain::coding::Coding;
use shared_codec::CodecError;
use thiserror::Error;

/// Errors raised by the type registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No document type with this name
    #[error("Unknown document type: {document_type}")]
    UnknownType {
        /// Requested type name
        document_type: String,
    },

    /// Document type has no message with this name
    #[error("Unknown message {name} for document type {document_type}")]
    UnknownMessage {
        /// Type the message was looked up in
        document_type: String,
        /// Requested message name
        name: String,
    },

    /// Value length outside the message's constraints
    #[error("Message {name} violates constraints: length {length}, {detail}")]
    ConstraintViolation {
        /// Message name
        name: String,
        /// Measured length (characters for text, bytes otherwise)
        length: usize,
        /// Which bound was broken
        detail: String,
    },

    /// Value variant cannot be written with the message's coding
    #[error("Message {name} expects {coding} coding, got {value_kind} value")]
    ValueCodingMismatch {
        /// Message name
        name: String,
        /// Coding from the definition
        coding: Coding,
        /// Variant of the supplied value
        value_kind: &'static str,
    },

    /// Stored bytes are not a valid value for the coding
    #[error("Invalid {coding} value: {reason}")]
    InvalidValue {
        /// Coding the bytes were decoded with
        coding: Coding,
        /// What was wrong
        reason: String,
    },

    /// Registry input record failed validation
    #[error("Invalid registry record {record}: {reason}")]
    InvalidRecord {
        /// Type name or definition id of the record
        record: String,
        /// What was wrong
        reason: String,
    },

    /// A message table tried to claim the signature tag
    #[error("Document type {document_type} declares reserved signature tag 0xff")]
    ReservedTag {
        /// Offending type or definition
        document_type: String,
    },

    /// Value bytes could not be packed or unpacked
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Shorthand result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
