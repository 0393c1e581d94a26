//! # Built-in Tables
//!
//! Document types shipped with the codec, used until a loader replaces them
//! and again after "reset to defaults". The overlay table ships empty:
//! extended definitions are issuer data and always come from a loader.

use crate::domain::coding::{Coding, Constraints};
use crate::domain::definition::{DocumentTypeDefinition, MessageDefinition};
use crate::domain::errors::RegistryResult;
use crate::domain::tables::{ExtendedDefinitionTable, TypeTable};

/// ICAO visa.
pub const ICAO_VISA: &str = "ICAO_VISA";
/// Arrival attestation document.
pub const ARRIVAL_ATTESTATION: &str = "ARRIVAL_ATTESTATION";
/// Residence permit.
pub const RESIDENCE_PERMIT: &str = "RESIDENCE_PERMIT";
/// Supplementary sheet to a residence permit.
pub const SUPPLEMENTARY_SHEET: &str = "SUPPLEMENTARY_SHEET";
/// Social insurance card.
pub const SOCIAL_INSURANCE_CARD: &str = "SOCIAL_INSURANCE_CARD";
/// Address sticker for identity cards.
pub const ADDRESS_STICKER_ID: &str = "ADDRESS_STICKER_ID";
/// Address sticker for passports.
pub const ADDRESS_STICKER_PASSPORT: &str = "ADDRESS_STICKER_PASSPORT";
/// ICAO emergency travel document.
pub const ICAO_EMERGENCY_TRAVEL_DOCUMENT: &str = "ICAO_EMERGENCY_TRAVEL_DOCUMENT";
/// Administrative documents; messages come from a UUID-selected overlay.
pub const ADMINISTRATIVE_DOCUMENTS: &str = "ADMINISTRATIVE_DOCUMENTS";
/// ICAO barcode (IDB) message set.
pub const ICAO_BARCODE: &str = "ICAO_BARCODE";

/// `documentRef` recorded on the IDB message set. IDB payloads carry no type
/// reference of their own, and the value is not indexed for VDS lookup.
pub const ICAO_BARCODE_REF: u16 = 0x0000;

fn msg(tag: u8, name: &str, coding: Coding, constraints: Constraints) -> MessageDefinition {
    MessageDefinition::new(tag, name, coding, constraints)
}

/// The built-in document types.
pub fn default_type_table() -> RegistryResult<TypeTable> {
    use Coding::*;

    let types = vec![
        DocumentTypeDefinition::new(
            ICAO_VISA,
            0x5d01,
            vec![
                msg(0x01, "MRZ_MRVA", Mrz, Constraints::max(88)),
                msg(0x02, "MRZ_MRVB", Mrz, Constraints::max(72)),
                msg(0x03, "NUMBER_OF_ENTRIES", Byte, Constraints::NONE),
                msg(0x04, "DURATION_OF_STAY", Bytes, Constraints::fixed(3)),
                msg(0x05, "PASSPORT_NUMBER", C40, Constraints::max(9)),
                msg(0x06, "VISA_TYPE", Bytes, Constraints::max(4)),
                msg(0x07, "ADDITIONAL_FEATURES", Bytes, Constraints::max(254)),
            ],
        )?,
        DocumentTypeDefinition::new(
            ARRIVAL_ATTESTATION,
            0xfd02,
            vec![
                msg(0x02, "MRZ", Mrz, Constraints::max(72)),
                msg(0x03, "AZR", C40, Constraints::fixed(12)),
            ],
        )?,
        DocumentTypeDefinition::new(
            RESIDENCE_PERMIT,
            0xfb06,
            vec![
                msg(0x02, "MRZ", Mrz, Constraints::max(90)),
                msg(0x03, "PASSPORT_NUMBER", C40, Constraints::max(9)),
            ],
        )?,
        DocumentTypeDefinition::new(
            SUPPLEMENTARY_SHEET,
            0xfa06,
            vec![
                msg(0x04, "MRZ", Mrz, Constraints::max(90)),
                msg(0x05, "SHEET_NUMBER", C40, Constraints::max(9)),
            ],
        )?,
        DocumentTypeDefinition::new(
            SOCIAL_INSURANCE_CARD,
            0xfc04,
            vec![
                msg(0x01, "SOCIAL_INSURANCE_NUMBER", Utf8String, Constraints::fixed(12)),
                msg(0x02, "SURNAME", Utf8String, Constraints::NONE),
                msg(0x03, "FIRST_NAME", Utf8String, Constraints::NONE),
                msg(0x04, "BIRTH_NAME", Utf8String, Constraints::NONE),
            ],
        )?,
        DocumentTypeDefinition::new(
            ADDRESS_STICKER_ID,
            0xf80a,
            vec![
                msg(0x01, "DOCUMENT_NUMBER", C40, Constraints::fixed(9)),
                msg(0x02, "OFFICIAL_MUNICIPALITY_CODE", C40, Constraints::fixed(8)),
                msg(0x03, "POSTAL_CODE", C40, Constraints::fixed(5)),
            ],
        )?,
        DocumentTypeDefinition::new(
            ADDRESS_STICKER_PASSPORT,
            0xf908,
            vec![
                msg(0x01, "DOCUMENT_NUMBER", C40, Constraints::fixed(9)),
                msg(0x02, "OFFICIAL_MUNICIPALITY_CODE", C40, Constraints::fixed(8)),
                msg(0x03, "RESIDENCE_LOCALITY", Utf8String, Constraints::NONE),
            ],
        )?,
        DocumentTypeDefinition::new(
            ICAO_EMERGENCY_TRAVEL_DOCUMENT,
            0x5e03,
            vec![msg(0x02, "MRZ", Mrz, Constraints::max(72))],
        )?,
        DocumentTypeDefinition::new(
            ADMINISTRATIVE_DOCUMENTS,
            0xf60d,
            vec![
                msg(0x00, "DEFINITION_UUID", Bytes, Constraints::fixed(16)),
                msg(0x01, "ISSUING_AUTHORITY", Utf8String, Constraints::NONE),
                msg(0x02, "VALID_UNTIL", Date, Constraints::NONE),
            ],
        )?
        .with_uuid_lookup(0x00),
        DocumentTypeDefinition::new(
            ICAO_BARCODE,
            ICAO_BARCODE_REF,
            vec![
                msg(0x01, "VISA", Bytes, Constraints::NONE),
                msg(0x02, "EMERGENCY_TRAVEL_DOCUMENT", Bytes, Constraints::NONE),
                msg(0x03, "PROOF_OF_TESTING", Bytes, Constraints::NONE),
                msg(0x04, "PROOF_OF_VACCINATION", Bytes, Constraints::NONE),
                msg(0x05, "PROOF_OF_RECOVERY", Bytes, Constraints::NONE),
                msg(0x06, "DIGITAL_TRAVEL_AUTHORIZATION", Bytes, Constraints::NONE),
                msg(0x07, "MRZ_TD1", Mrz, Constraints::max(90)),
                msg(0x08, "MRZ_TD3", Mrz, Constraints::max(88)),
                msg(0x09, "CAN", C40, Constraints::fixed(6)),
                msg(0x0a, "EXPIRY_DATE", Date, Constraints::NONE),
            ],
        )?,
    ];

    TypeTable::new(types)
}

/// The built-in overlay table (empty).
pub fn default_extended_table() -> ExtendedDefinitionTable {
    ExtendedDefinitionTable::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let table = default_type_table().unwrap();
        assert_eq!(table.len(), 10);
        assert_eq!(table.by_ref(0x5d01).unwrap().name, ICAO_VISA);
        assert_eq!(table.get(ICAO_BARCODE).unwrap().document_ref, ICAO_BARCODE_REF);
        assert!(table.by_ref(ICAO_BARCODE_REF).is_none());
        assert!(default_extended_table().is_empty());
    }

    #[test]
    fn test_administrative_documents_use_overlay() {
        let table = default_type_table().unwrap();
        let admin = table.get(ADMINISTRATIVE_DOCUMENTS).unwrap();
        assert!(admin.requires_uuid_lookup);
        assert_eq!(admin.uuid_tag, 0);
        assert_eq!(admin.message_by_tag(0).unwrap().constraints, Constraints::fixed(16));
    }
}
