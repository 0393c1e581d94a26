//! # Seal Assembly
//!
//! Pure encode/parse steps. Signing happens in the service; everything here
//! works on bytes and a registry snapshot.
//!
//! ## VDS wire layout
//!
//! ```text
//! header | message zone | FF len r||s
//! ```
//!
//! ## IDB payload layout
//!
//! ```text
//! header | 61 len (messages) | [7E len certificate] | [7F len r||s]
//! ```

use crate::domain::config::SealConfig;
use crate::domain::errors::{SealError, SealResult};
use crate::domain::header::VdsHeader;
use crate::domain::idb_header::IdbHeader;
use crate::domain::seal::{
    IdbSeal, MessageInput, Seal, VdsSeal, IDB_FLAG_SIGNED, IDB_FLAG_UNSIGNED,
    IDB_MESSAGE_GROUP_TAG, IDB_SIGNATURE_TAG, IDB_SIGNER_CERTIFICATE_TAG,
};
use shared_codec::{der_tlv, transport, ByteReader, DerTlv, SIGNATURE_TAG};
use tracing::{debug, warn};
use uuid::Uuid;
use vds_registry::{
    DocumentTypeDefinition, MessageValue, RegistryTables, ICAO_BARCODE, UNKNOWN_DOCUMENT_TYPE,
};

// =============================================================================
// MESSAGE ENCODING
// =============================================================================

/// Encode named inputs for `document_type`.
///
/// For types resolved through an extended definition, the overlay is taken
/// from the input carrying the UUID (the message defined at `uuid_tag`).
pub fn encode_messages(
    tables: &RegistryTables,
    document_type: &str,
    inputs: &[MessageInput],
) -> SealResult<Vec<DerTlv>> {
    let overlay = tables
        .types
        .get(document_type)
        .filter(|base| base.requires_uuid_lookup)
        .and_then(|base| overlay_id(base, inputs));
    let scope = tables.scope(document_type, overlay.as_ref())?;

    inputs
        .iter()
        .map(|input| scope.encode(&input.name, &input.value).map_err(SealError::from))
        .collect()
}

fn overlay_id(base: &DocumentTypeDefinition, inputs: &[MessageInput]) -> Option<Uuid> {
    let uuid_message = base.message_by_tag(base.uuid_tag)?;
    let input = inputs
        .iter()
        .find(|i| i.name.eq_ignore_ascii_case(&uuid_message.name))?;
    match &input.value {
        MessageValue::Bytes(bytes) => Uuid::from_slice(bytes).ok(),
        _ => None,
    }
}

/// Frame message TLVs, wrapping them in one TLV for the legacy layout.
pub fn message_zone(tlvs: &[DerTlv], wrapper_tag: Option<u8>) -> SealResult<Vec<u8>> {
    let flat = der_tlv::encode_all(tlvs)?;
    match wrapper_tag {
        Some(tag) => Ok(der_tlv::encode(tag, &flat)?),
        None => Ok(flat),
    }
}

/// Append the signature TLV to the signed bytes.
pub fn append_signature(mut signed_data: Vec<u8>, tag: u8, signature: &[u8]) -> SealResult<Vec<u8>> {
    signed_data.extend(der_tlv::encode(tag, signature)?);
    Ok(signed_data)
}

// =============================================================================
// VDS PARSING
// =============================================================================

/// Parse binary VDS content.
///
/// An unregistered `documentRef` yields type `"UNKNOWN"` with the raw
/// messages kept and nothing decoded.
pub fn parse_vds(data: &[u8], config: &SealConfig, tables: &RegistryTables) -> SealResult<Seal> {
    let (header, header_len) = VdsHeader::parse(data, config)?;
    let zone = &data[header_len..];

    let mut reader = ByteReader::new(zone);
    let mut tlvs = Vec::new();
    let mut signature = None;
    let mut signed_len = data.len();

    while !reader.is_empty() {
        let start = reader.position();
        let tlv = der_tlv::read_tlv(&mut reader)?;
        if tlv.tag == SIGNATURE_TAG {
            if !reader.is_empty() {
                return Err(SealError::MalformedSeal(format!(
                    "{} bytes after signature",
                    reader.remaining()
                )));
            }
            signed_len = header_len + start;
            signature = Some(tlv.value);
        } else {
            tlvs.push(tlv);
        }
    }

    let document_ref = header.document_ref();
    let Some(definition) = tables.types.by_ref(document_ref) else {
        warn!(
            document_ref = format_args!("0x{document_ref:04x}"),
            "Unregistered documentRef, decoding as UNKNOWN"
        );
        return Ok(Seal::MessageGroup(VdsSeal {
            header,
            document_type: UNKNOWN_DOCUMENT_TYPE.to_string(),
            extended_definition: None,
            raw_messages: tlvs,
            messages: Vec::new(),
            signature,
            signed_len,
            encoded: data.to_vec(),
        }));
    };

    let legacy = definition.wrapper_tag.is_some();
    let raw_messages = match definition.wrapper_tag {
        Some(wrapper) => match tlvs.as_slice() {
            [outer] if outer.tag == wrapper => der_tlv::decode_all(&outer.value)?,
            _ => {
                return Err(SealError::MalformedSeal(format!(
                    "{} expects a single 0x{wrapper:02x} wrapper, found {} TLVs",
                    definition.name,
                    tlvs.len()
                )))
            }
        },
        None => tlvs,
    };

    let scope = tables.scope_for_messages(&definition.name, &raw_messages)?;
    let messages = scope.decode_all(&raw_messages)?;
    debug!(
        document_type = %definition.name,
        messages = messages.len(),
        dropped = raw_messages.len() - messages.len(),
        signed = signature.is_some(),
        "Parsed VDS"
    );

    let seal = VdsSeal {
        header,
        document_type: definition.name.clone(),
        extended_definition: scope.overlay().map(|o| o.definition_id),
        raw_messages,
        messages,
        signature,
        signed_len,
        encoded: data.to_vec(),
    };
    Ok(if legacy {
        Seal::LegacySingleMessage(seal)
    } else {
        Seal::MessageGroup(seal)
    })
}

// =============================================================================
// IDB
// =============================================================================

/// Message group TLV of an IDB payload.
pub fn idb_message_group(tlvs: &[DerTlv]) -> SealResult<Vec<u8>> {
    Ok(der_tlv::encode(IDB_MESSAGE_GROUP_TAG, &der_tlv::encode_all(tlvs)?)?)
}

/// Parse an IDB transport string (`<identifier><flag><base32>`).
pub fn parse_idb(text: &str, config: &SealConfig, tables: &RegistryTables) -> SealResult<Seal> {
    let rest = text
        .strip_prefix(config.idb_barcode_identifier.as_str())
        .ok_or_else(|| SealError::InvalidBarcodeIdentifier {
            expected: config.idb_barcode_identifier.clone(),
        })?;

    let mut chars = rest.chars();
    let signed = match chars.next() {
        Some(IDB_FLAG_UNSIGNED) => false,
        Some(IDB_FLAG_SIGNED) => true,
        Some(other) => return Err(SealError::UnsupportedBarcodeFlag(other)),
        None => return Err(SealError::MalformedSeal("missing barcode flag".to_string())),
    };

    let payload = transport::from_base32(chars.as_str())?;
    Ok(Seal::IdbBarcode(parse_idb_payload(payload, signed, tables)?))
}

/// Parse a decoded IDB payload.
pub fn parse_idb_payload(
    payload: Vec<u8>,
    signed: bool,
    tables: &RegistryTables,
) -> SealResult<IdbSeal> {
    let (header, header_len) = IdbHeader::parse(&payload, signed)?;
    let mut reader = ByteReader::new(&payload[header_len..]);

    let group = der_tlv::read_tlv(&mut reader)?;
    if group.tag != IDB_MESSAGE_GROUP_TAG {
        return Err(SealError::MalformedSeal(format!(
            "expected message group 0x61, found 0x{:02x}",
            group.tag
        )));
    }
    let signed_len = header_len + reader.position();
    let raw_messages = der_tlv::decode_all(&group.value)?;

    let mut signer_certificate = None;
    let mut signature = None;
    while !reader.is_empty() {
        let tlv = der_tlv::read_tlv(&mut reader)?;
        match tlv.tag {
            IDB_SIGNER_CERTIFICATE_TAG if signature.is_none() && signer_certificate.is_none() => {
                signer_certificate = Some(tlv.value)
            }
            IDB_SIGNATURE_TAG if signature.is_none() => signature = Some(tlv.value),
            other => {
                return Err(SealError::MalformedSeal(format!(
                    "unexpected tag 0x{other:02x} after message group"
                )))
            }
        }
    }
    match (signed, signature.is_some()) {
        (true, false) => {
            return Err(SealError::MalformedSeal(
                "signed barcode without signature".to_string(),
            ))
        }
        (false, true) => {
            return Err(SealError::MalformedSeal(
                "unsigned barcode carries a signature".to_string(),
            ))
        }
        _ => {}
    }

    let messages = if tables.types.get(ICAO_BARCODE).is_some() {
        tables
            .scope_for_messages(ICAO_BARCODE, &raw_messages)?
            .decode_all(&raw_messages)?
    } else {
        warn!("No ICAO barcode message set registered, messages left undecoded");
        Vec::new()
    };

    Ok(IdbSeal {
        header,
        raw_messages,
        messages,
        signer_certificate,
        signature,
        signed_len,
        payload,
    })
}
