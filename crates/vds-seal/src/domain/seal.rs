//! # Seals
//!
//! A seal is header + messages + optional signature. The three structural
//! variants share that shape and differ in how the message zone is framed:
//!
//! - `LegacySingleMessage`: one wrapper TLV holds every message TLV
//! - `MessageGroup`: each message is its own top-level TLV
//! - `IdbBarcode`: ICAO barcode payload, messages inside a `0x61` group
//!
//! Parsed seals keep the exact bytes the signature covers.

use crate::domain::config::SealConfig;
use crate::domain::header::VdsHeader;
use crate::domain::idb_header::{IdbHeader, IDB_CERT_REF_LEN};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_codec::{transport, DerTlv};
use uuid::Uuid;
use vds_registry::{Message, MessageValue, ICAO_BARCODE};

/// Barcode flag: unsigned, uncompressed.
pub const IDB_FLAG_UNSIGNED: char = 'A';
/// Barcode flag: signed, uncompressed.
pub const IDB_FLAG_SIGNED: char = 'B';

/// IDB message group tag.
pub const IDB_MESSAGE_GROUP_TAG: u8 = 0x61;
/// IDB signer certificate tag.
pub const IDB_SIGNER_CERTIFICATE_TAG: u8 = 0x7E;
/// IDB signature tag.
pub const IDB_SIGNATURE_TAG: u8 = 0x7F;

// =============================================================================
// INPUT
// =============================================================================

/// A named value to encode into a seal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInput {
    pub name: String,
    pub value: MessageValue,
}

impl MessageInput {
    pub fn new(name: impl Into<String>, value: MessageValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Header fields of an ICAO barcode to build.
///
/// `certificate_reference`, `signature_date` and `signer_certificate` only
/// apply when a signer is supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdbSealParams {
    pub issuing_country: String,
    pub certificate_reference: [u8; IDB_CERT_REF_LEN],
    pub signature_date: NaiveDate,
    /// DER X.509 certificate to embed after the message group
    pub signer_certificate: Option<Vec<u8>>,
}

// =============================================================================
// VDS
// =============================================================================

/// A visible digital seal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VdsSeal {
    pub(crate) header: VdsHeader,
    pub(crate) document_type: String,
    pub(crate) extended_definition: Option<Uuid>,
    pub(crate) raw_messages: Vec<DerTlv>,
    pub(crate) messages: Vec<Message>,
    pub(crate) signature: Option<Vec<u8>>,
    pub(crate) signed_len: usize,
    pub(crate) encoded: Vec<u8>,
}

impl VdsSeal {
    pub fn header(&self) -> &VdsHeader {
        &self.header
    }

    /// Registered type name, or `"UNKNOWN"`.
    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    /// Overlay that resolved the messages, if any.
    pub fn extended_definition(&self) -> Option<Uuid> {
        self.extended_definition
    }
}

// =============================================================================
// IDB
// =============================================================================

/// An ICAO barcode seal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdbSeal {
    pub(crate) header: IdbHeader,
    pub(crate) raw_messages: Vec<DerTlv>,
    pub(crate) messages: Vec<Message>,
    pub(crate) signer_certificate: Option<Vec<u8>>,
    pub(crate) signature: Option<Vec<u8>>,
    pub(crate) signed_len: usize,
    pub(crate) payload: Vec<u8>,
}

impl IdbSeal {
    pub fn header(&self) -> &IdbHeader {
        &self.header
    }

    /// DER X.509 certificate embedded by the signer, if any.
    pub fn signer_certificate(&self) -> Option<&[u8]> {
        self.signer_certificate.as_deref()
    }
}

// =============================================================================
// SEAL
// =============================================================================

/// Any supported seal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seal {
    LegacySingleMessage(VdsSeal),
    MessageGroup(VdsSeal),
    IdbBarcode(IdbSeal),
}

impl Seal {
    /// The VDS body, for the two VDS variants.
    pub fn as_vds(&self) -> Option<&VdsSeal> {
        match self {
            Seal::LegacySingleMessage(vds) | Seal::MessageGroup(vds) => Some(vds),
            Seal::IdbBarcode(_) => None,
        }
    }

    pub fn as_idb(&self) -> Option<&IdbSeal> {
        match self {
            Seal::IdbBarcode(idb) => Some(idb),
            _ => None,
        }
    }

    pub fn document_type(&self) -> &str {
        match self {
            Seal::LegacySingleMessage(vds) | Seal::MessageGroup(vds) => &vds.document_type,
            Seal::IdbBarcode(_) => ICAO_BARCODE,
        }
    }

    /// Decoded messages in wire order. Unresolvable ones are absent.
    pub fn messages(&self) -> &[Message] {
        match self {
            Seal::LegacySingleMessage(vds) | Seal::MessageGroup(vds) => &vds.messages,
            Seal::IdbBarcode(idb) => &idb.messages,
        }
    }

    /// Message TLVs as found on the wire, signature excluded.
    pub fn raw_messages(&self) -> &[DerTlv] {
        match self {
            Seal::LegacySingleMessage(vds) | Seal::MessageGroup(vds) => &vds.raw_messages,
            Seal::IdbBarcode(idb) => &idb.raw_messages,
        }
    }

    /// Value of the message `name` (case-insensitive).
    pub fn message(&self, name: &str) -> Option<&MessageValue> {
        self.messages()
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .map(|m| &m.value)
    }

    /// Raw `r || s` signature.
    pub fn signature(&self) -> Option<&[u8]> {
        match self {
            Seal::LegacySingleMessage(vds) | Seal::MessageGroup(vds) => vds.signature.as_deref(),
            Seal::IdbBarcode(idb) => idb.signature.as_deref(),
        }
    }

    /// Bytes covered by the signature.
    pub fn signed_data(&self) -> &[u8] {
        match self {
            Seal::LegacySingleMessage(vds) | Seal::MessageGroup(vds) => {
                &vds.encoded[..vds.signed_len]
            }
            Seal::IdbBarcode(idb) => &idb.payload[..idb.signed_len],
        }
    }

    /// Complete binary form (the Base32 payload for IDB).
    pub fn encoded(&self) -> &[u8] {
        match self {
            Seal::LegacySingleMessage(vds) | Seal::MessageGroup(vds) => &vds.encoded,
            Seal::IdbBarcode(idb) => &idb.payload,
        }
    }

    /// Text handed to the barcode renderer.
    pub fn to_transport_string(&self, config: &SealConfig) -> String {
        match self {
            Seal::LegacySingleMessage(vds) | Seal::MessageGroup(vds) => {
                transport::to_base256(&vds.encoded)
            }
            Seal::IdbBarcode(idb) => {
                let flag = if idb.header.is_signed() {
                    IDB_FLAG_SIGNED
                } else {
                    IDB_FLAG_UNSIGNED
                };
                format!(
                    "{}{}{}",
                    config.idb_barcode_identifier,
                    flag,
                    transport::to_base32(&idb.payload)
                )
            }
        }
    }
}
